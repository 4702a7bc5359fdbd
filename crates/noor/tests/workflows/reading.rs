use noor::{
  layout::{DisplaySettings, ListLayout},
  mushaf::{BookmarkToggle, MushafPositionSink, MushafState, ReadingCursor},
  position::PositionDebouncer,
};

use super::*;

#[traced_test]
#[test]
fn test_layout_over_fixture() -> TestResult<()> {
  let quran = load_quran();
  let layout = ListLayout::new(quran.index()?, quran.dataset(), &DisplaySettings::default());

  assert_eq!(layout.len(), 26);
  // header, six two-line verses, then the five-line closing verse of Al-Fatihah
  assert_eq!(layout.height_of(0), Some(120.0));
  assert_eq!(layout.height_of(1), Some(132.0));
  assert_eq!(layout.height_of(7), Some(282.0));
  assert_eq!(layout.offset_of(8), Some(1194.0));
  assert_eq!(layout.position_at(1194.0), Some(8));
  assert_eq!(layout.position_at(1193.9), Some(7));
  assert_eq!(layout.position_at(layout.total_height()), None);
  Ok(())
}

#[traced_test]
#[tokio::test(start_paused = true)]
async fn test_scrolling_persists_last_visible_ayah() -> TestResult<()> {
  let (config, _dir) = create_test_config();
  let store = open_store(&config);
  let quran = load_quran();
  let layout = ListLayout::new(quran.index()?, quran.dataset(), &config.display);

  let sink = Arc::new(MushafPositionSink::new(store.clone()));
  let mut debouncer = PositionDebouncer::new(sink, config.debounce())?;
  let mut cursor = ReadingCursor::default();

  // fling through the list, reporting the top row every 10ms
  let mut offset = 0.0;
  while offset < layout.total_height() {
    let position = layout.position_at(offset).unwrap();
    if let Some(global_index) = cursor.observe(quran.entry(position)?.unwrap()) {
      debouncer.update(global_index);
    }
    offset += 100.0;
    tokio::time::sleep(Duration::from_millis(10)).await;
  }
  assert!(debouncer.has_pending());
  assert_eq!(MushafState::load(store.as_ref())?.current_position, 1);

  tokio::time::sleep(config.debounce() + Duration::from_millis(1)).await;
  assert!(!debouncer.has_pending());

  let saved = MushafState::load(store.as_ref())?;
  assert_eq!(saved.current_position, 22);
  assert_eq!((cursor.surah, cursor.ayah), (114, 6));
  assert_eq!(saved.restore_position(&quran)?, Some(25));
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_flush_before_teardown() -> TestResult<()> {
  let (config, _dir) = create_test_config();
  let store = open_store(&config);
  let sink = Arc::new(MushafPositionSink::new(store.clone()));
  let mut debouncer = PositionDebouncer::new(sink, Duration::from_secs(60))?;

  debouncer.update(12);
  debouncer.flush()?;
  debouncer.dispose();
  assert_eq!(MushafState::load(store.as_ref())?.current_position, 12);

  // reopening the file sees the same state
  drop(store);
  let reopened = SqliteStore::open(&config.database_path)?;
  assert_eq!(MushafState::load(&reopened)?.current_position, 12);
  Ok(())
}

#[traced_test]
#[test]
fn test_bookmarks_survive_reopen() -> TestResult<()> {
  let (config, _dir) = create_test_config();
  let quran = load_quran();
  let ikhlas = quran.dataset().ayah_by_ref("112:1".parse()?).unwrap();
  let nas = quran.dataset().ayah_by_ref("114:1".parse()?).unwrap();

  {
    let store = open_store(&config);
    let mut state = MushafState::load(store.as_ref())?;
    assert!(matches!(state.toggle_bookmark(ikhlas), BookmarkToggle::Added(_)));
    assert!(matches!(state.toggle_bookmark(nas), BookmarkToggle::Added(_)));
    state.save(store.as_ref())?;
  }

  let store = open_store(&config);
  let mut state = MushafState::load(store.as_ref())?;
  assert_eq!(state.bookmarks.len(), 2);
  assert_eq!(state.bookmarks[1].color_index, 1);
  assert!(state.is_bookmarked(ikhlas.global_index));
  assert!(matches!(state.toggle_bookmark(ikhlas), BookmarkToggle::Removed(_)));
  assert_eq!(state.next_bookmark_color(), 1);
  Ok(())
}
