mod plugins;
mod rules;

use packing_common::{
  BaseMode, ModeFlags, NormalizedPackingOptions, PluginChain, RenderDescriptor, RuleList,
};
use packing_error::BuildResult;

pub(crate) use self::{plugins::define_node_env, rules::dll_rules};

#[derive(Debug, Default)]
pub struct RuleSet {
  pub rules: RuleList,
  pub plugins: PluginChain,
}

/// Chooses module rules and plugin directives from the mode flags.
///
/// Flags are applied stage by stage: base, then the Dev or Build family, then optimization when
/// `minimize` is set, then hot reload when `hot` is set. Each stage only appends, and the chain
/// orders directives by family, so every combination of `{build, minimize, hot}` falls out of the
/// same four steps.
pub struct RuleSetSelector<'a> {
  options: &'a NormalizedPackingOptions,
}

impl<'a> RuleSetSelector<'a> {
  pub fn new(options: &'a NormalizedPackingOptions) -> Self {
    Self { options }
  }

  /// `pages` feeds the Dev render directives and is ignored by Build.
  pub fn select(&self, flags: &ModeFlags, pages: &[RenderDescriptor]) -> BuildResult<RuleSet> {
    let mode = BaseMode::from_flags(flags)?;
    let family = mode.rule_family();
    let mut rule_set = RuleSet::default();

    rule_set.rules.extend(rules::base_rules(&self.options.page_extension)?);

    rule_set.rules.extend(rules::mode_rules(family));
    rule_set.plugins.extend(plugins::base_plugins(mode, self.options, flags, pages));

    if flags.minimize {
      rule_set.plugins.extend(plugins::optimization_plugins());
    }

    if flags.hot {
      rule_set.plugins.extend(plugins::hot_reload_plugins());
    }

    tracing::debug!(
      ?mode,
      ?family,
      rules = rule_set.rules.len(),
      plugins = rule_set.plugins.len(),
      "selected rule set"
    );

    Ok(rule_set)
  }
}

#[cfg(test)]
fn test_options() -> NormalizedPackingOptions {
  crate::normalize_options_with_env(
    packing_common::PackingOptions { cwd: Some("/project".into()), ..Default::default() },
    crate::EnvSnapshot::default(),
  )
}

#[cfg(test)]
fn test_pages() -> Vec<RenderDescriptor> {
  ["home", "list/detail"]
    .into_iter()
    .map(|key| {
      RenderDescriptor::from(&packing_common::PageDescriptor {
        route_key: key.to_string(),
        template_path: format!("/project/src/templates/pages/{key}.jade").into(),
        entry_module_path: format!("./src/entries/{key}.js"),
        mock_data_path: format!("/project/mock/page/{key}.js").into(),
      })
    })
    .collect()
}

#[test]
fn test_every_flag_combination_keeps_family_order() {
  use packing_common::PluginFamily;

  let options = test_options();
  let pages = test_pages();
  let selector = RuleSetSelector::new(&options);

  for bits in 0..8u8 {
    let flags = ModeFlags {
      build: bits & 1 != 0,
      minimize: bits & 2 != 0,
      hot: bits & 4 != 0,
      ..ModeFlags::default()
    };

    let result = selector.select(&flags, &pages);
    if flags.build && flags.hot {
      assert!(result.is_err(), "{flags:?} should be rejected");
      continue;
    }

    let plugins = result.unwrap().plugins;
    let families = plugins.families().collect::<Vec<_>>();
    assert!(families.windows(2).all(|pair| pair[0] <= pair[1]), "{flags:?}: {families:?}");

    let has = |family| families.contains(&family);
    assert_eq!(has(PluginFamily::Clean), flags.build);
    assert_eq!(has(PluginFamily::Revision), flags.build);
    assert_eq!(has(PluginFamily::RenderPage), !flags.build);
    assert_eq!(has(PluginFamily::Optimization), flags.minimize);
    assert_eq!(has(PluginFamily::HotModuleReplacement), flags.hot);
    if flags.hot {
      assert_eq!(families.last(), Some(&PluginFamily::HotModuleReplacement));
    }
  }
}

#[test]
fn test_dev_renders_one_directive_per_page() {
  let options = test_options();
  let pages = test_pages();

  let rule_set = RuleSetSelector::new(&options).select(&ModeFlags::default(), &pages).unwrap();

  assert_eq!(rule_set.plugins.names(), vec!["render-page", "render-page"]);
  let chain = rule_set.rules.transformers_for("src/styles/app.less");
  assert_eq!(chain.first().map(|t| t.name.as_str()), Some("style"));
  let chain = rule_set.rules.transformers_for("src/entries/home.js");
  assert_eq!(chain.iter().map(|t| t.name.as_str()).collect::<Vec<_>>(), vec!["babel", "eslint"]);
}

#[test]
fn test_build_minimized_order() {
  let options = test_options();
  let flags = ModeFlags { build: true, minimize: true, ..ModeFlags::default() };

  let rule_set = RuleSetSelector::new(&options).select(&flags, &test_pages()).unwrap();

  assert_eq!(
    rule_set.plugins.names(),
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
  let chain = rule_set.rules.transformers_for("src/entries/home.js");
  assert_eq!(chain[0].to_string(), "strip?strip[]=debug");
  let chain = rule_set.rules.transformers_for("src/styles/app.scss");
  assert_eq!(chain[0].name, "extract");
}

#[test]
fn test_build_and_hot_conflict() {
  use packing_error::PackingError;

  let options = test_options();
  let flags = ModeFlags { build: true, hot: true, ..ModeFlags::default() };

  let error = RuleSetSelector::new(&options).select(&flags, &[]).unwrap_err();

  assert!(matches!(
    error.packing_errors().next(),
    Some(PackingError::ConflictingModeFlags { .. })
  ));
}

#[test]
fn test_replace_hash_uses_cdn_root() {
  use packing_common::PluginDirective;

  let assets_domains = |rule_set: RuleSet| {
    rule_set
      .plugins
      .iter()
      .filter_map(|directive| match directive {
        PluginDirective::ReplaceHash { assets_domain, .. } => Some(assets_domain.clone()),
        _ => None,
      })
      .collect::<Vec<_>>()
  };
  let flags = ModeFlags { build: true, ..ModeFlags::default() };

  let options = crate::normalize_options_with_env(
    packing_common::PackingOptions { cwd: Some("/project".into()), ..Default::default() },
    crate::EnvSnapshot { node_env: None, cdn_root: Some("//cdn.example.com".to_string()) },
  );
  let rule_set = RuleSetSelector::new(&options).select(&flags, &[]).unwrap();
  assert_eq!(assets_domains(rule_set), vec!["//cdn.example.com"]);

  let rule_set = RuleSetSelector::new(&test_options()).select(&flags, &[]).unwrap();
  assert_eq!(assets_domains(rule_set), vec![String::new()]);
}
