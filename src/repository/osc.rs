// src/repository/osc.rs

//! Loader for the OSC JSON "contents" index format
//!
//! The index lives at `{base}/api/v3/contents` and is a top-level JSON
//! array of package objects. Every field except `slug` is optional and
//! real-world indexes are ragged, so parsing is tolerant: a field whose
//! declared type does not match expectation reads as absent. A malformed
//! document (unparseable, or not an array) never yields a partial catalog.

use chrono::{Local, TimeZone};
use serde_json::Value;
use tracing::{debug, warn};

use crate::package::{Operation, Package};
use crate::progress::{Phase, ProgressReporter};
use crate::transport::Transport;

use super::Repository;

pub(super) const TYPE_OSC: &str = "osc";

const CONTENTS_PATH: &str = "/api/v3/contents";

/// Repository speaking the OSC contents API.
pub struct OscRepo {
    name: String,
    url: String,
    loaded: bool,
}

impl OscRepo {
    /// Create a repository for `url`, labelled `name`. No network activity
    /// happens until [`Repository::load_packages`] is called.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            loaded: false,
        }
    }

    /// Fetch the index document, downgrading https to http once if the
    /// first attempt fails. A downgrade persists in `self.url` even when
    /// the retry also fails.
    fn fetch_index(&mut self, transport: &dyn Transport) -> Option<Vec<u8>> {
        let index_url = format!("{}{}", self.url, CONTENTS_PATH);
        let err = match transport.fetch(&index_url) {
            Ok(body) => return Some(body),
            Err(err) => err,
        };

        let Some(rest) = self.url.strip_prefix("https") else {
            debug!("Fetch failed for \"{}\": {}", self.name, err);
            return None;
        };

        warn!(
            "Attempting http fallback for https repo \"{}\" after loading failure: {}",
            self.name, err
        );
        self.url = format!("http{rest}");

        let retry_url = format!("{}{}", self.url, CONTENTS_PATH);
        match transport.fetch(&retry_url) {
            Ok(body) => Some(body),
            Err(retry_err) => {
                debug!("Fallback fetch failed for \"{}\": {}", self.name, retry_err);
                None
            }
        }
    }
}

impl Repository for OscRepo {
    fn name(&self) -> &str {
        &self.name
    }

    fn url(&self) -> &str {
        &self.url
    }

    fn is_loaded(&self) -> bool {
        self.loaded
    }

    fn repo_type(&self) -> &'static str {
        TYPE_OSC
    }

    fn load_packages(
        &mut self,
        transport: &dyn Transport,
        progress: &dyn ProgressReporter,
    ) -> Vec<Package> {
        let Some(body) = self.fetch_index(transport) else {
            warn!(
                "Could not update repository metadata for \"{}\" repo",
                self.name
            );
            self.loaded = false;
            return Vec::new();
        };

        progress.phase(Phase::Updating, 1, 1);

        let doc: Value = match serde_json::from_slice(&body) {
            Ok(doc) => doc,
            Err(err) => {
                warn!("Invalid format in downloaded data for {}: {}", self.url, err);
                self.loaded = false;
                return Vec::new();
            }
        };

        let Some(entries) = doc.as_array() else {
            warn!(
                "Invalid format in downloaded data for {}: expected a top-level array",
                self.url
            );
            self.loaded = false;
            return Vec::new();
        };

        let total = entries.len() as u64;
        let mut result = Vec::with_capacity(entries.len());

        for (i, entry) in entries.iter().enumerate() {
            progress.item(total, i as u64 + 1);

            let Some(slug) = str_field(entry, "slug") else {
                warn!("Missing slug for package on \"{}\" repo, skipping", self.name);
                continue;
            };

            let mut package = Package::new(slug, Operation::Get);

            if let Some(name) = str_field(entry, "name") {
                package.title = name.to_string();
            }

            package.author = str_field(entry, "author").map(str::to_string);

            if let Some(desc) = obj_field(entry, "description") {
                package.short_desc = str_field(desc, "short").map(str::to_string);
                // the index carries literal backslash-n escapes
                package.long_desc =
                    str_field(desc, "long").map(|long| long.replace("\\n", "\n"));
            }

            package.version = str_field(entry, "version").map(str::to_string);

            if let Some(ts) = int_field(entry, "release_date") {
                if let Some(rendered) = render_timestamp(ts) {
                    package.updated = Some(rendered);
                    package.updated_timestamp = Some(ts);
                }
            }

            if let Some(sizes) = obj_field(entry, "file_size") {
                if let Some(compressed) = uint_field(sizes, "zip_compressed") {
                    package.download_size += compressed;
                }
                if let Some(uncompressed) = uint_field(sizes, "zip_uncompressed") {
                    package.extracted_size += uncompressed;
                }
            }

            package.category = str_field(entry, "category").map(str::to_string);

            if let Some(urls) = obj_field(entry, "url") {
                package.url = str_field(urls, "zip").map(str::to_string);
                package.icon_url = str_field(urls, "icon").map(str::to_string);
            }

            result.push(package);
        }

        self.loaded = true;
        result
    }

    fn zip_url(&self, package: &Package) -> String {
        // OSC packages advertise the artifact location directly
        package.url.clone().unwrap_or_default()
    }

    fn icon_url(&self, package: &Package) -> String {
        package.icon_url.clone().unwrap_or_default()
    }
}

/// Render Unix seconds as `YYYY-MM-DD HH:MM:SS` in the local zone.
///
/// Returns `None` for instants chrono cannot place on the calendar, in
/// which case neither `updated` field is set.
fn render_timestamp(ts: i64) -> Option<String> {
    Local
        .timestamp_opt(ts, 0)
        .earliest()
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
}

// Tolerant field access: a key whose value has the wrong type reads as
// absent, the same as a missing key.

fn str_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str)
}

fn int_field(value: &Value, key: &str) -> Option<i64> {
    value.get(key).and_then(Value::as_i64)
}

fn uint_field(value: &Value, key: &str) -> Option<u64> {
    value.get(key).and_then(Value::as_u64)
}

fn obj_field<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.get(key).filter(|v| v.is_object())
}
