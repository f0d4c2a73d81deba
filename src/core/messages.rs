//! # Message Catalog
//!
//! Renders translation keys into user-facing text with Fluent. The
//! built-in English messages live in `locales/en-US.ftl`; the dotted
//! translation keys map to Fluent ids by replacing `.` with `-`:
//!
//! ```text
//! manga.action.library.remove.label.success
//!   → manga-action-library-remove-label-success = { $count -> ... }
//! ```
//!
//! Overrides from the `[messages]` config table are layered on top, one
//! resource per entry. Their values are Fluent patterns, and i18next
//! habits still work: `{{ count }}` becomes `{ $count }`, and keys ending
//! in a plural category (`_one`, `_other`, ...) are gathered into a
//! single select expression on `$count`.
//!
//! A key with no message renders as the key itself, so a missing
//! translation is visible instead of silently empty.

use std::collections::{BTreeMap, HashMap};

use fluent::concurrent::FluentBundle;
use fluent::{FluentArgs, FluentResource, FluentValue};
use log::{debug, warn};
use unic_langid::langid;

const BUILTIN_FTL: &str = include_str!("locales/en-US.ftl");

/// CLDR plural categories, in the order variants are written out.
const PLURAL_CATEGORIES: [&str; 6] = ["zero", "one", "two", "few", "many", "other"];

pub struct MessageCatalog {
    bundle: FluentBundle<FluentResource>,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        let mut bundle = FluentBundle::new_concurrent(vec![langid!("en-US")]);
        // Isolation marks would end up in plain-text notifications.
        bundle.set_use_isolating(false);
        if let Some(resource) = parse_resource("built-in messages", BUILTIN_FTL.to_string())
            && let Err(errors) = bundle.add_resource(resource)
        {
            warn!("Built-in messages were not fully loaded: {errors:?}");
        }
        Self { bundle }
    }
}

impl MessageCatalog {
    /// Built-in English messages with `overrides` layered on top.
    pub fn with_overrides(overrides: &HashMap<String, String>) -> Self {
        let mut catalog = Self::default();
        for (key, source) in override_sources(overrides) {
            debug!("Overriding message {key}");
            if let Some(resource) = parse_resource(&key, source) {
                catalog.bundle.add_resource_overriding(resource);
            }
        }
        catalog
    }

    /// Renders `key` without arguments.
    pub fn text(&self, key: &str) -> String {
        self.format(key, None)
    }

    /// Renders `key` for `count` items; plural variants select on `$count`.
    pub fn render(&self, key: &str, count: usize) -> String {
        let mut args = FluentArgs::new();
        args.set("count", FluentValue::from(count));
        self.format(key, Some(&args))
    }

    fn format(&self, key: &str, args: Option<&FluentArgs>) -> String {
        let Some(pattern) = self
            .bundle
            .get_message(&fluent_id(key))
            .and_then(|message| message.value())
        else {
            return key.to_string();
        };

        let mut errors = Vec::new();
        let text = self.bundle.format_pattern(pattern, args, &mut errors);
        if errors.is_empty() {
            text.into_owned()
        } else {
            warn!("Could not format message {key}: {errors:?}");
            key.to_string()
        }
    }
}

/// Dotted translation key → Fluent message id.
fn fluent_id(key: &str) -> String {
    key.replace('.', "-")
}

fn parse_resource(origin: &str, source: String) -> Option<FluentResource> {
    match FluentResource::try_new(source) {
        Ok(resource) => Some(resource),
        Err((_, errors)) => {
            warn!("Skipping unparseable message {origin}: {errors:?}");
            None
        }
    }
}

/// Splits `key_other` into `key` and the index of `other` in
/// [`PLURAL_CATEGORIES`] when the suffix is a plural category.
fn split_plural_suffix(key: &str) -> Option<(&str, usize)> {
    let (base, suffix) = key.rsplit_once('_')?;
    PLURAL_CATEGORIES
        .iter()
        .position(|category| *category == suffix)
        .map(|rank| (base, rank))
}

/// Builds one Fluent source per overridden message.
fn override_sources(overrides: &HashMap<String, String>) -> BTreeMap<String, String> {
    let mut plain = BTreeMap::new();
    let mut plural: BTreeMap<&str, BTreeMap<usize, &str>> = BTreeMap::new();

    for (key, value) in overrides {
        match split_plural_suffix(key) {
            Some((base, rank)) => {
                plural.entry(base).or_default().insert(rank, value.as_str());
            }
            None => {
                plain.insert(key.clone(), value.as_str());
            }
        }
    }

    let mut sources = BTreeMap::new();
    for (key, value) in plain {
        let source = format!("{} = {}\n", fluent_id(&key), indent(&to_fluent_pattern(value)));
        sources.insert(key, source);
    }
    for (base, variants) in plural {
        // Plural variants win over a bare value for the same key.
        sources.insert(base.to_string(), plural_source(base, &variants));
    }
    sources
}

fn plural_source(base: &str, variants: &BTreeMap<usize, &str>) -> String {
    let default_rank = variants
        .keys()
        .copied()
        .max()
        .unwrap_or(PLURAL_CATEGORIES.len() - 1);

    let mut source = format!("{} = {{ $count ->\n", fluent_id(base));
    for (rank, value) in variants {
        let marker = if *rank == default_rank { " *" } else { "  " };
        source.push_str(&format!(
            "  {marker}[{}] {}\n",
            PLURAL_CATEGORIES[*rank],
            indent(&to_fluent_pattern(value))
        ));
    }
    source.push_str("}\n");
    source
}

/// Continuation lines of a Fluent value must be indented.
fn indent(value: &str) -> String {
    value.lines().collect::<Vec<_>>().join("\n        ")
}

/// Rewrites i18next `{{ name }}` placeholders as Fluent `{ $name }`.
fn to_fluent_pattern(template: &str) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        let Some(len) = rest[start + 2..].find("}}") else {
            break;
        };
        let name = rest[start + 2..start + 2 + len].trim();
        out.push_str(&rest[..start]);
        if is_identifier(name) {
            out.push_str(&format!("{{ ${name} }}"));
        } else {
            out.push_str(&rest[start..start + 4 + len]);
        }
        rest = &rest[start + 4 + len..];
    }
    out.push_str(rest);
    out
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
