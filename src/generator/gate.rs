//! Decides whether a (template, entity) pair is generated at all.
//!
//! Rejections are the normal way of excluding combinations (the `daemon` route has no
//! SDK, fuzzer or examples, for instance) and are skipped silently.

use super::discovery::Category;
use crate::error::{MakerError, Result};
use crate::verbose_log;
use std::path::Path;

/// `Ok(false)` skips the pair; `Err` means the template vanished after discovery.
///
/// `single` is the `TB_MAKER_SINGLE` filter: when set, only templates whose path contains
/// it are processed.
pub fn should_process(
    template_path: &Path,
    category: Category,
    tag: &str,
    single: Option<&str>,
) -> Result<bool> {
    let source = template_path.to_string_lossy();

    if let Some(single) = single.filter(|s| !s.is_empty()) {
        if !source.contains(single) {
            return Ok(false);
        }
    }

    if tag.is_empty() {
        return Ok(false);
    }

    if is_excluded(&source, tag) {
        verbose_log!("  {} excludes {} for {}", category, source, tag);
        return Ok(false);
    }

    if !template_path.is_file() {
        return Err(MakerError::TemplateMissing(source.into_owned()));
    }

    Ok(true)
}

fn is_excluded(source: &str, tag: &str) -> bool {
    let is_sdk = source.contains("sdk_");
    let is_example = source.contains("examples_");
    let is_python = source.contains("python");
    let is_typescript = source.contains("typescript");
    let is_fuzzer = source.contains("sdkFuzzer");

    let explore_rule = (is_sdk && (is_python || is_typescript || is_fuzzer)) || is_example;
    match tag {
        "daemon" => is_sdk || is_fuzzer || is_example,
        "scrape" => is_fuzzer || is_example || explore_rule,
        "explore" => explore_rule,
        _ => false,
    }
}
