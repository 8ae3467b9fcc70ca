use std::path::{Path, PathBuf};

use packing_common::{
  EntryGraph, EntrySpec, NormalizedPackingOptions, PageDescriptor, RenderDescriptor,
};
use packing_error::{BuildResult, PackingError};
use packing_fs::FileSystem;
use packing_utils::path_ext::PathExt;
use rustc_hash::FxHashMap;

/// Result of scanning the pages root. Every key of `entry` has exactly one page and one
/// render descriptor, all in lexicographic path order.
#[derive(Debug, Default)]
pub struct Discovery {
  pub entry: EntryGraph,
  pub pages: Vec<PageDescriptor>,
  pub render_descriptors: Vec<RenderDescriptor>,
}

/// Scans `pages_root` for files matching `page_glob` and derives one entry per page.
///
/// Holds no state between calls, so it is safe to re-run on every watch trigger.
pub fn discover<F: FileSystem>(
  fs: &F,
  pages_root: &Path,
  page_glob: &str,
  options: &NormalizedPackingOptions,
) -> BuildResult<Discovery> {
  let mut page_files = collect_page_files(fs, pages_root, page_glob)?;
  page_files.sort_unstable();

  let mock_pages_root = options.mock_pages_root();
  let mut seen: FxHashMap<String, PathBuf> = FxHashMap::default();
  let mut discovery = Discovery::default();

  for (relative, template_path) in page_files {
    let route_key = route_key_of(&relative, &options.page_extension);

    if let Some(first) = seen.insert(route_key.clone(), template_path.clone()) {
      return Err(
        PackingError::DuplicateRouteKey { key: route_key, first, second: template_path }.into(),
      );
    }

    let script = format!("{route_key}{}", options.script_extension);
    let page = PageDescriptor {
      entry_module_path: format!("./{}/{script}", options.paths.entries),
      mock_data_path: mock_pages_root.join(&script),
      template_path,
      route_key,
    };

    tracing::debug!(
      route_key = %page.route_key,
      template = %page.template_path.display(),
      "discovered page"
    );

    discovery
      .entry
      .insert(page.route_key.clone(), EntrySpec::Single(page.entry_module_path.clone()));
    discovery.render_descriptors.push(RenderDescriptor::from(&page));
    discovery.pages.push(page);
  }

  Ok(discovery)
}

/// Walks `root` depth first, returning `(slash path relative to root, full path)` for every
/// file the glob accepts.
fn collect_page_files<F: FileSystem>(
  fs: &F,
  root: &Path,
  page_glob: &str,
) -> Result<Vec<(String, PathBuf)>, PackingError> {
  let mut matched = vec![];
  let mut pending = vec![root.to_path_buf()];

  while let Some(dir) = pending.pop() {
    let children = fs
      .read_dir(&dir)
      .map_err(|source| PackingError::TemplateRootUnreadable { path: dir.clone(), source })?;

    for child in children {
      // Symlinked directories are not followed, so a link back to an ancestor cannot loop.
      if fs.is_dir(&child) {
        if !fs.is_symlink(&child) {
          pending.push(child);
        }
      } else if fs.is_file(&child) {
        let Some(relative) = child.slash_relative_to(root) else { continue };
        if matches_page_glob(page_glob, &relative) {
          matched.push((relative, child));
        }
      }
    }
  }

  Ok(matched)
}

/// Strips the configured page extension. A glob may also accept other extensions, whose final
/// dot-suffix is dropped instead.
fn route_key_of(relative: &str, page_extension: &str) -> String {
  match relative.strip_suffix(page_extension) {
    Some(key) if !page_extension.is_empty() => key.to_string(),
    _ => Path::new(relative).without_extension(),
  }
}

fn matches_page_glob(glob: &str, relative: &str) -> bool {
  // A leading `**/` also matches files directly under the root.
  fast_glob::glob_match(glob, relative)
    || glob.strip_prefix("**/").is_some_and(|rest| fast_glob::glob_match(rest, relative))
}

#[cfg(test)]
fn write_pages(root: &Path, pages: &[&str]) {
  for page in pages {
    let path = root.join(page);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, "").unwrap();
  }
}

#[cfg(test)]
fn test_options(cwd: &Path) -> NormalizedPackingOptions {
  crate::normalize_options_with_env(
    packing_common::PackingOptions {
      cwd: Some(cwd.to_path_buf()),
      page_extension: Some(".tpl".to_string()),
      ..Default::default()
    },
    crate::EnvSnapshot::default(),
  )
}

#[test]
fn test_discover_nested_pages() {
  let dir = tempfile::tempdir().unwrap();
  let options = test_options(dir.path());
  let pages_root = options.pages_root();
  write_pages(&pages_root, &["list/detail.tpl", "home.tpl", "notes.md"]);

  let discovery =
    discover(&packing_fs::OsFileSystem, &pages_root, &options.page_glob, &options).unwrap();

  assert_eq!(discovery.entry.keys().collect::<Vec<_>>(), vec!["home", "list/detail"]);
  assert_eq!(discovery.entry["home"], EntrySpec::from("./src/entries/home.js"));
  assert_eq!(discovery.entry["list/detail"], EntrySpec::from("./src/entries/list/detail.js"));

  let filenames =
    discovery.render_descriptors.iter().map(|d| d.output_filename.as_str()).collect::<Vec<_>>();
  assert_eq!(filenames, vec!["home.html", "list/detail.html"]);

  let detail = &discovery.pages[1];
  assert_eq!(detail.template_path, pages_root.join("list/detail.tpl"));
  assert_eq!(detail.mock_data_path, dir.path().join("mock/page/list/detail.js"));

  let render = &discovery.render_descriptors[1];
  assert!(render.cache_disabled);
  assert!(!render.inject_assets);
  assert_eq!(render.init_data, detail.mock_data_path);
  assert_eq!(render.associated_chunks.iter().collect::<Vec<_>>(), vec!["list/detail"]);
}

#[test]
fn test_route_keys_match_relative_paths() {
  let dir = tempfile::tempdir().unwrap();
  let options = test_options(dir.path());
  let pages_root = options.pages_root();
  let files = ["a/b/c.tpl", "a/b.tpl", "z.tpl", "a.tpl", "m/index.tpl"];
  write_pages(&pages_root, &files);

  let discovery =
    discover(&packing_fs::OsFileSystem, &pages_root, &options.page_glob, &options).unwrap();

  let keys = discovery.pages.iter().map(|page| page.route_key.as_str()).collect::<Vec<_>>();
  assert_eq!(keys, vec!["a", "a/b", "a/b/c", "m/index", "z"]);
  for page in &discovery.pages {
    let relative = page.template_path.slash_relative_to(&pages_root).unwrap();
    assert_eq!(relative, format!("{}.tpl", page.route_key));
  }
}

#[test]
fn test_overlapping_extensions_are_duplicate_route_keys() {
  let dir = tempfile::tempdir().unwrap();
  let options = test_options(dir.path());
  let pages_root = options.pages_root();
  write_pages(&pages_root, &["home.jade", "home.tpl"]);

  let error =
    discover(&packing_fs::OsFileSystem, &pages_root, "**/*.{jade,tpl}", &options).unwrap_err();

  assert!(matches!(
    error.packing_errors().next(),
    Some(PackingError::DuplicateRouteKey { key, .. }) if key == "home"
  ));
}

#[test]
fn test_missing_root_is_unreadable() {
  let dir = tempfile::tempdir().unwrap();
  let options = test_options(dir.path());

  let error = discover(&packing_fs::OsFileSystem, &options.pages_root(), "**/*.tpl", &options)
    .unwrap_err();

  assert!(matches!(
    error.packing_errors().next(),
    Some(PackingError::TemplateRootUnreadable { path, .. }) if *path == options.pages_root()
  ));
}

#[test]
fn test_rediscovery_is_fresh() {
  let dir = tempfile::tempdir().unwrap();
  let options = test_options(dir.path());
  let pages_root = options.pages_root();
  write_pages(&pages_root, &["home.tpl"]);

  let first =
    discover(&packing_fs::OsFileSystem, &pages_root, &options.page_glob, &options).unwrap();
  std::fs::remove_file(pages_root.join("home.tpl")).unwrap();
  write_pages(&pages_root, &["about.tpl"]);
  let second =
    discover(&packing_fs::OsFileSystem, &pages_root, &options.page_glob, &options).unwrap();

  assert_eq!(first.entry.keys().collect::<Vec<_>>(), vec!["home"]);
  assert_eq!(second.entry.keys().collect::<Vec<_>>(), vec!["about"]);
}

#[test]
fn test_multi_dot_page_extension() {
  let dir = tempfile::tempdir().unwrap();
  let options = crate::normalize_options_with_env(
    packing_common::PackingOptions {
      cwd: Some(dir.path().to_path_buf()),
      page_extension: Some(".page.html".to_string()),
      ..Default::default()
    },
    crate::EnvSnapshot::default(),
  );
  let pages_root = options.pages_root();
  write_pages(&pages_root, &["home.page.html", "list/detail.page.html"]);

  let discovery =
    discover(&packing_fs::OsFileSystem, &pages_root, &options.page_glob, &options).unwrap();

  assert_eq!(discovery.entry.keys().collect::<Vec<_>>(), vec!["home", "list/detail"]);
  assert_eq!(discovery.entry["home"], EntrySpec::from("./src/entries/home.js"));
  assert_eq!(discovery.pages[1].mock_data_path, dir.path().join("mock/page/list/detail.js"));
  assert_eq!(discovery.render_descriptors[0].output_filename, "home.html");
}

#[test]
fn test_route_key_of() {
  assert_eq!(route_key_of("list/detail.page.html", ".page.html"), "list/detail");
  assert_eq!(route_key_of("home.jade", ".tpl"), "home");
  assert_eq!(route_key_of("archive.v2.tpl", ".tpl"), "archive.v2");
}

#[cfg(unix)]
#[test]
fn test_symlinked_directories_are_not_followed() {
  let dir = tempfile::tempdir().unwrap();
  let options = test_options(dir.path());
  let pages_root = options.pages_root();
  write_pages(&pages_root, &["home.tpl", "list/detail.tpl"]);
  std::os::unix::fs::symlink(&pages_root, pages_root.join("loop")).unwrap();
  std::os::unix::fs::symlink(pages_root.join("list"), pages_root.join("list/again")).unwrap();

  let discovery =
    discover(&packing_fs::OsFileSystem, &pages_root, &options.page_glob, &options).unwrap();

  assert_eq!(discovery.entry.keys().collect::<Vec<_>>(), vec!["home", "list/detail"]);
}
