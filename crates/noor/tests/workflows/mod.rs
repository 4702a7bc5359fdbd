use super::*;

mod reading;
mod tracking;

#[traced_test]
#[test]
fn test_fixture_index_shape() -> TestResult<()> {
  let quran = load_quran();
  let index = quran.index()?;

  // four headers plus 22 verses
  assert_eq!(index.len(), 26);
  assert_eq!(quran.position_of_surah(1)?, Some(0));
  assert_eq!(quran.position_of_surah(112)?, Some(8));
  assert_eq!(quran.position_of_surah(113)?, Some(13));
  assert_eq!(quran.position_of_surah(114)?, Some(19));
  assert_eq!(quran.position_of_surah(2)?, None);
  assert_eq!(quran.position_of_ayah(22)?, Some(25));
  assert_eq!(quran.position_of_juz(30)?, Some(9));

  for ayah in quran.dataset().ayahs() {
    let position = quran.position_of_ayah(ayah.global_index)?.unwrap();
    match quran.entry(position)? {
      Some(ListEntry::Ayah(found)) => assert_eq!(found, ayah),
      other => panic!("row {position} resolved to {other:?}"),
    }
  }
  Ok(())
}

#[test]
fn test_reference_lookup() -> TestResult<()> {
  let quran = load_quran();
  let reference: AyahRef = "113:5".parse()?;
  let ayah = quran.dataset().ayah_by_ref(reference).unwrap();
  assert_eq!(ayah.global_index, 16);
  assert_eq!(quran.position_of_ref(reference)?, Some(18));
  assert_eq!(quran.position_of_ref("113:6".parse()?)?, None);
  Ok(())
}
