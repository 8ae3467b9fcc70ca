use packing_error::PackingError;

use crate::ModeFlags;

/// The four mutually-exclusive modes a flag vector collapses to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseMode {
  Dev,
  DevHot,
  Build,
  BuildMinimized,
}

/// The module rule family a mode selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleFamily {
  Dev,
  Build,
}

impl BaseMode {
  pub fn from_flags(flags: &ModeFlags) -> Result<Self, PackingError> {
    match (flags.build, flags.hot) {
      (true, true) => Err(PackingError::ConflictingModeFlags {
        reason: "`build` and `hot` are both set, hot reload cannot target a static production build"
          .to_string(),
      }),
      (true, false) if flags.minimize => Ok(Self::BuildMinimized),
      (true, false) => Ok(Self::Build),
      (false, true) => Ok(Self::DevHot),
      (false, false) => Ok(Self::Dev),
    }
  }

  #[inline]
  pub fn is_build(self) -> bool {
    matches!(self, Self::Build | Self::BuildMinimized)
  }

  #[inline]
  pub fn rule_family(self) -> RuleFamily {
    if self.is_build() { RuleFamily::Build } else { RuleFamily::Dev }
  }
}

#[test]
fn test_from_flags() {
  let flags = |build, hot, minimize| ModeFlags { build, hot, minimize, ..ModeFlags::default() };

  assert_eq!(BaseMode::from_flags(&flags(false, false, false)).unwrap(), BaseMode::Dev);
  assert_eq!(BaseMode::from_flags(&flags(false, false, true)).unwrap(), BaseMode::Dev);
  assert_eq!(BaseMode::from_flags(&flags(false, true, true)).unwrap(), BaseMode::DevHot);
  assert_eq!(BaseMode::from_flags(&flags(true, false, false)).unwrap(), BaseMode::Build);
  assert_eq!(BaseMode::from_flags(&flags(true, false, true)).unwrap(), BaseMode::BuildMinimized);
  assert!(matches!(
    BaseMode::from_flags(&flags(true, true, false)),
    Err(PackingError::ConflictingModeFlags { .. })
  ));
}
