//! Configuration for normalization calls.
//!
//! [`Settings`] is the caller-facing option set, mirrored one-to-one on the
//! published option names. A [`Policy`] is derived from it once per
//! top-level call and threaded by reference through parsing and rendering;
//! nothing here is process-global, so concurrent calls cannot race on
//! option state.

use bon::Builder;
use strum::{Display, EnumString};

use crate::registry::Registry;
use crate::types::NormalizeError;

/// Options accepted by the normalization entry points.
///
/// All fields are public and can be set directly or through the generated
/// builder:
///
/// ```
/// use texnorm::Settings;
///
/// let settings = Settings::builder()
///     .normalize_token(true)
///     .ensure_valid_formula(false)
///     .build();
/// assert!(settings.normalize_token);
/// assert!(settings.keep_left_right_marker);
/// ```
#[derive(Debug, Clone, Builder)]
pub struct Settings {
    /// Apply the symbol-alias table to every token.
    #[builder(default = false)]
    pub normalize_token: bool,
    /// Apply the case-folding alias table to every token.
    #[builder(default = false)]
    pub ignore_similar_despite_capital: bool,
    /// Retain `\left` / `\right` markers instead of dropping them at lex
    /// time.
    #[builder(default = true)]
    pub keep_left_right_marker: bool,
    /// Drop an `\angle` marker inside trigonometric arguments.
    #[builder(default = false)]
    pub strip_angle_for_trig: bool,
    /// Fail with a syntax error instead of producing the lenient raw-token
    /// reconstruction.
    #[builder(default = true)]
    pub ensure_valid_formula: bool,
    /// Preserve doubled outermost braces instead of stripping them.
    #[builder(default = false)]
    pub keep_successive_outmost_brace: bool,
    /// Force parentheses around a single-token logarithm argument, so
    /// `\log_{2}3` becomes `\log_{2}(3)`.
    #[builder(default = true)]
    pub brace_single_elem_for_log: bool,
    /// Keep the `\rm` marker in the output instead of rendering its
    /// argument bare.
    #[builder(default = true)]
    pub keep_rm_sign: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A per-kind-group option name accepted by [`Policy::set_group_option`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "snake_case")]
pub enum GroupOption {
    /// Strip `\angle` inside the arguments of the markers named in the call.
    StripAngle,
    /// Parenthesize single-token arguments of the markers named in the call.
    BraceSingleElem,
    /// Retain the `\rm` marker when rendering.
    KeepRm,
}

/// Resolved per-call normalization policy, read during both parsing and
/// rendering of a single top-level call.
#[derive(Debug, Clone)]
pub struct Policy {
    /// `\angle` stripping is active for trigonometric arguments.
    pub strip_angle: bool,
    /// Single-token logarithm arguments still get parentheses.
    pub brace_single_elem: bool,
    /// The `\rm` marker survives rendering.
    pub keep_rm: bool,
    /// Doubled outermost braces are preserved.
    pub keep_outmost_brace: bool,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            strip_angle: false,
            brace_single_elem: true,
            keep_rm: true,
            keep_outmost_brace: false,
        }
    }
}

impl Policy {
    /// Applies one option to the kind group named by `markers`.
    ///
    /// Every marker must be present in the registry; an unregistered name
    /// fails with [`NormalizeError::UnknownMarker`] before anything is
    /// applied.
    pub fn set_group_option(
        &mut self,
        registry: &Registry,
        markers: &[&str],
        option: GroupOption,
        value: bool,
    ) -> Result<(), NormalizeError> {
        for marker in markers {
            if !registry.contains(marker) {
                return Err(NormalizeError::UnknownMarker {
                    marker: (*marker).to_owned(),
                });
            }
        }
        match option {
            GroupOption::StripAngle => self.strip_angle = value,
            GroupOption::BraceSingleElem => self.brace_single_elem = value,
            GroupOption::KeepRm => self.keep_rm = value,
        }
        Ok(())
    }

    /// Builds the policy for one top-level call.
    pub fn from_settings(registry: &Registry, settings: &Settings) -> Result<Self, NormalizeError> {
        let mut policy = Self {
            keep_outmost_brace: settings.keep_successive_outmost_brace,
            ..Self::default()
        };
        policy.set_group_option(
            registry,
            &["\\sin", "\\cos", "\\tan"],
            GroupOption::StripAngle,
            settings.strip_angle_for_trig,
        )?;
        policy.set_group_option(
            registry,
            &["\\log"],
            GroupOption::BraceSingleElem,
            settings.brace_single_elem_for_log,
        )?;
        policy.set_group_option(
            registry,
            &["\\rm"],
            GroupOption::KeepRm,
            settings.keep_rm_sign,
        )?;
        Ok(policy)
    }
}
