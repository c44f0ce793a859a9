//! Shared helpers for the integration suite.

use std::sync::OnceLock;

use texnorm::{normalize_expression, normalize_in_sentence, NormContext, NormalizeError, Settings};

static DEFAULT_CONTEXT: OnceLock<NormContext> = OnceLock::new();

pub fn default_ctx() -> &'static NormContext {
    DEFAULT_CONTEXT.get_or_init(NormContext::default)
}

/// Every closure is equivalent to an "it should ..." case; the name ends
/// up in the panic message when the case fails.
pub fn it(name: &str, case: impl FnOnce() -> Result<(), NormalizeError>) {
    if let Err(err) = case() {
        panic!("{name}: {err}");
    }
}

pub fn norm(latex: &str) -> Result<String, NormalizeError> {
    normalize_expression(default_ctx(), latex, &Settings::default())
}

pub fn norm_with(latex: &str, settings: &Settings) -> Result<String, NormalizeError> {
    normalize_expression(default_ctx(), latex, settings)
}

pub fn norm_sentence(sentence: &str, settings: &Settings) -> Result<String, NormalizeError> {
    normalize_in_sentence(default_ctx(), sentence, settings)
}

pub fn tokens_normalized() -> Settings {
    Settings::builder().normalize_token(true).build()
}
