use std::{
  io,
  path::{Path, PathBuf},
  sync::atomic::{AtomicUsize, Ordering},
};

use packing::{
  EntrySpec, EnvSnapshot, FileSystem, ModeFlags, OsFileSystem, Packer, PackingError,
  PackingOptions, PluginFamily, normalize_options_with_env,
};

fn project(pages: &[&str]) -> tempfile::TempDir {
  let dir = tempfile::tempdir().unwrap();
  for page in pages {
    let path = dir.path().join("src/templates/pages").join(page);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, "").unwrap();
  }
  dir
}

fn packer(cwd: &Path, page_extension: &str) -> Packer {
  let options = normalize_options_with_env(
    PackingOptions {
      cwd: Some(cwd.to_path_buf()),
      page_extension: Some(page_extension.to_string()),
      ..PackingOptions::default()
    },
    EnvSnapshot::default(),
  );
  Packer::with_file_system(options, OsFileSystem)
}

fn flags(build: bool, minimize: bool, hot: bool) -> ModeFlags {
  ModeFlags { build, minimize, hot, ..ModeFlags::default() }
}

#[test]
fn dev_plan_has_one_entry_and_render_directive_per_page() {
  let dir = project(&["home.tpl", "list/detail.tpl"]);

  let plan = packer(dir.path(), ".tpl").plan(&ModeFlags::default()).unwrap();

  assert_eq!(plan.entry().keys().collect::<Vec<_>>(), vec!["home", "list/detail"]);
  assert_eq!(plan.plugins().names(), vec!["render-page", "render-page"]);
  assert_eq!(plan.output().filename, "[name].js");

  let json = plan.to_json().unwrap();
  assert_eq!(json["plugins"][0]["outputFilename"], "home.html");
  assert_eq!(json["plugins"][1]["outputFilename"], "list/detail.html");
  assert_eq!(json["plugins"][1]["associatedChunks"], serde_json::json!(["list/detail"]));
  assert_eq!(json["devtool"], "source-map");
}

#[test]
fn hot_plan_prepends_the_bootstrap_module() {
  let dir = project(&["home.jade"]);

  let plan = packer(dir.path(), ".jade").plan(&flags(false, false, true)).unwrap();

  assert_eq!(
    plan.entry()["home"],
    EntrySpec::from(vec!["webpack-hot-middleware/client", "./src/entries/home.js"])
  );
  assert_eq!(plan.plugins().families().last(), Some(PluginFamily::HotModuleReplacement));
}

#[test]
fn long_term_caching_minimized_build() {
  let dir = project(&["home.jade", "about.jade"]);
  let flags = ModeFlags { long_term_caching: true, ..flags(true, true, false) };

  let plan = packer(dir.path(), ".jade").plan(&flags).unwrap();

  assert!(plan.output().filename.contains("[chunkhash:8]"));
  assert_eq!(
    plan.plugins().names(),
    vec![
      "clean",
      "copy-assets",
      "extract-stylesheet",
      "define-environment",
      "replace-hash",
      "revision",
      "dedupe",
      "occurrence-order",
      "minify"
    ]
  );
  assert_eq!(plan.entry()["about"], EntrySpec::from("./src/entries/about.js"));

  let json = plan.to_json().unwrap();
  assert_eq!(json["plugins"][2]["filename"], "[name]-[chunkhash:8].css");
  assert_eq!(
    json["resolvePolicy"]["alias"]["env-alias"],
    dir.path().join("src/config/env/production").to_string_lossy().as_ref()
  );
}

#[test]
fn every_accepted_combination_orders_plugin_families() {
  let dir = project(&["home.jade", "list/detail.jade"]);
  let packer = packer(dir.path(), ".jade");

  for build in [false, true] {
    for minimize in [false, true] {
      for hot in [false, true] {
        let flags = flags(build, minimize, hot);
        let result = packer.plan(&flags);
        if build && hot {
          assert!(result.is_err());
          continue;
        }

        let plan = result.unwrap();
        let families = plan.plugins().families().collect::<Vec<_>>();
        assert!(families.windows(2).all(|pair| pair[0] <= pair[1]), "{flags:?}: {families:?}");
        assert_eq!(families.contains(&PluginFamily::RenderPage), !build);
        assert_eq!(families.contains(&PluginFamily::Optimization), minimize);
        assert_eq!(families.contains(&PluginFamily::HotModuleReplacement), hot);
      }
    }
  }
}

#[test]
fn missing_pages_root_is_reported() {
  let dir = tempfile::tempdir().unwrap();

  let error = packer(dir.path(), ".jade").plan(&ModeFlags::default()).unwrap_err();

  assert!(matches!(
    error.packing_errors().next(),
    Some(PackingError::TemplateRootUnreadable { .. })
  ));
}

#[derive(Default)]
struct CountingFileSystem {
  reads: AtomicUsize,
}

impl FileSystem for CountingFileSystem {
  fn read_dir(&self, _path: &Path) -> io::Result<Vec<PathBuf>> {
    self.reads.fetch_add(1, Ordering::SeqCst);
    Ok(vec![])
  }

  fn is_dir(&self, _path: &Path) -> bool {
    false
  }

  fn is_file(&self, _path: &Path) -> bool {
    false
  }

  fn is_symlink(&self, _path: &Path) -> bool {
    false
  }
}

#[test]
fn conflicting_flags_fail_before_discovery() {
  let options = normalize_options_with_env(
    PackingOptions { cwd: Some(PathBuf::from("/project")), ..PackingOptions::default() },
    EnvSnapshot::default(),
  );
  let packer = Packer::with_file_system(options, CountingFileSystem::default());

  let error = packer.plan(&flags(true, false, true)).unwrap_err();

  assert!(matches!(
    error.packing_errors().next(),
    Some(PackingError::ConflictingModeFlags { .. })
  ));
  assert_eq!(packer_reads(&packer), 0);

  packer.plan(&ModeFlags::default()).unwrap();
  assert_eq!(packer_reads(&packer), 1);
}

fn packer_reads(packer: &Packer<CountingFileSystem>) -> usize {
  packer.file_system().reads.load(Ordering::SeqCst)
}
