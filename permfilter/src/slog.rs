//! Adapters for emitting masks and filtered values through `slog`.
//!
//! This module connects [`crate::FilterFields`] and [`crate::BitSet`] with
//! `slog` by providing `slog::Value` implementations that serialize as
//! structured JSON via `slog`'s nested-value support.
//!
//! It is responsible for:
//! - Ensuring a logged message is the *filtered* copy, never the original.
//! - Rendering masks as permission identifiers rather than raw bit indices.
//! - Avoiding fallible logging APIs: serialization failures are represented as
//!   placeholder strings rather than propagated as errors.
//!
//! It does not configure `slog` or decide which permissions a logger holds.

use serde::Serialize;
use serde_json::Value as JsonValue;
use slog::{Key, Record, Result as SlogResult, Serializer, Value as SlogValue};

use crate::{filter::Filterable, mask::BitSet, registry::Registry};

/// A `slog::Value` that emits an owned filtered payload as structured JSON.
pub struct FilteredJson {
    value: JsonValue,
}

impl FilteredJson {
    fn new(value: JsonValue) -> Self {
        Self { value }
    }
}

impl SlogValue for FilteredJson {
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        let nested = slog::Serde(self.value.clone());
        SlogValue::serialize(&nested, record, key, serializer)
    }
}

/// Converts messages into a `slog::Value` that logs their filtered form as JSON.
///
/// ## Example
/// ```ignore
/// use permfilter::slog::IntoFilteredJson;
///
/// info!(logger, "profile"; "profile" => profile.into_filtered_json(&audit_mask));
/// ```
pub trait IntoFilteredJson: Filterable + Serialize {
    /// Filters `self` against `mask` and returns a `slog::Value` holding the
    /// result as JSON.
    ///
    /// If converting the filtered output into `serde_json::Value` fails, the
    /// returned value stores the string `"Failed to serialize filtered value"`.
    fn into_filtered_json(self, mask: &BitSet) -> FilteredJson {
        let filtered = self.filtered(mask);
        let json_value = serde_json::to_value(filtered).unwrap_or_else(|_| {
            JsonValue::String("Failed to serialize filtered value".to_string())
        });
        FilteredJson::new(json_value)
    }
}

impl<T> IntoFilteredJson for T where T: Filterable + Serialize {}

/// Renders the identifiers a mask holds, resolved through `registry`.
///
/// Indices the registry does not know are rendered as `#<index>`.
pub fn mask_identifiers(mask: &BitSet, registry: &Registry) -> Vec<String> {
    mask.iter()
        .map(|index| {
            registry
                .identifier(index)
                .unwrap_or_else(|| format!("#{index}"))
        })
        .collect()
}

/// Logs a mask as the JSON list of identifiers it holds, resolved through
/// [`Registry::global`].
impl SlogValue for BitSet {
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        let identifiers = mask_identifiers(self, Registry::global());
        let nested = slog::Serde(JsonValue::from(identifiers));
        SlogValue::serialize(&nested, record, key, serializer)
    }
}
