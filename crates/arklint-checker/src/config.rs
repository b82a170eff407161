//! Consumed configuration and well-known names.
//!
//! The checker does not own its configuration: the surrounding linter hands
//! in a `LinterOptions` per run. The constants here mirror the ArkTS SDK
//! surface the checker recognizes (standard-library files, typed arrays,
//! the concurrency API names) and the default interop ignore lists.

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};

/// Directories whose contents are always classified as third-party
/// (dynamic) code, regardless of file extension.
pub const ARKTS_IGNORE_DIRS: &[&str] = &["node_modules", "oh_modules", "build", ".preview"];

/// Individual files always classified as third-party code.
pub const ARKTS_IGNORE_FILES: &[&str] = &["hvigorfile.ts", "hvigorfile.js"];

/// TypeScript standard-library declaration files (lower-cased basenames).
/// Symbols declared in these files are not counted as dynamic.
pub const STANDARD_LIBRARIES: &[&str] = &[
    "lib.d.ts",
    "lib.decorators.d.ts",
    "lib.decorators.legacy.d.ts",
    "lib.dom.d.ts",
    "lib.dom.iterable.d.ts",
    "lib.es5.d.ts",
    "lib.es6.d.ts",
    "lib.es2015.d.ts",
    "lib.es2015.collection.d.ts",
    "lib.es2015.core.d.ts",
    "lib.es2015.generator.d.ts",
    "lib.es2015.iterable.d.ts",
    "lib.es2015.promise.d.ts",
    "lib.es2015.proxy.d.ts",
    "lib.es2015.reflect.d.ts",
    "lib.es2015.symbol.d.ts",
    "lib.es2015.symbol.wellknown.d.ts",
    "lib.es2016.d.ts",
    "lib.es2016.array.include.d.ts",
    "lib.es2017.d.ts",
    "lib.es2017.object.d.ts",
    "lib.es2017.sharedmemory.d.ts",
    "lib.es2017.string.d.ts",
    "lib.es2017.typedarrays.d.ts",
    "lib.es2018.d.ts",
    "lib.es2018.asynciterable.d.ts",
    "lib.es2019.d.ts",
    "lib.es2019.array.d.ts",
    "lib.es2020.d.ts",
    "lib.es2020.bigint.d.ts",
    "lib.es2021.d.ts",
    "lib.es2022.d.ts",
    "lib.es2023.d.ts",
    "lib.esnext.d.ts",
    "lib.scripthost.d.ts",
    "lib.webworker.d.ts",
];

/// Names of the built-in typed-array classes.
pub const TYPED_ARRAYS: &[&str] = &[
    "Int8Array",
    "Uint8Array",
    "Uint8ClampedArray",
    "Int16Array",
    "Uint16Array",
    "Int32Array",
    "Uint32Array",
    "Float32Array",
    "Float64Array",
    "BigInt64Array",
    "BigUint64Array",
];

/// Decorator marking a class as sendable.
pub const SENDABLE_DECORATOR: &str = "Sendable";

/// Name of the sendable marker interface.
pub const ISENDABLE_TYPE: &str = "ISendable";

/// Namespace the marker interface must live in.
pub const LANG_NAMESPACE: &str = "lang";

/// Exact (lower-cased) basename of the language declaration module that may
/// declare the marker interface.
pub const ARKTS_LANG_D_ETS: &str = "@arkts.lang.d.ets";

/// Namespace of the shared-container classes.
pub const COLLECTIONS_NAMESPACE: &str = "collections";

/// Exact (lower-cased) basename of the collections declaration module.
pub const ARKTS_COLLECTIONS_D_ETS: &str = "@arkts.collections.d.ets";

/// Array-like classes of the collections namespace that may carry a numeric
/// index signature.
pub const ARKTS_COLLECTIONS_TYPES: &[&str] = &[
    "Array",
    "Int8Array",
    "Uint8Array",
    "Int16Array",
    "Uint16Array",
    "Int32Array",
    "Uint32Array",
    "Float32Array",
    "Float64Array",
];

/// Name of the dynamic-interop escape-hatch type.
pub const ES_OBJECT: &str = "ESObject";

/// Directive marking a module as shareable across execution contexts.
pub const USE_SHARED: &str = "use shared";

/// Options handed in by the surrounding linter for one run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LinterOptions {
    /// Relax the `.ets`-only rule so plain `.ts` test fixtures classify as
    /// statically-typed code.
    #[serde(default)]
    pub test_mode: bool,
    /// Enable the stricter anonymous-class assignability rule.
    #[serde(default)]
    pub advanced_class_checks: bool,
    /// Directory names classified as third-party code.
    #[serde(default = "default_ignore_dirs")]
    pub ignore_dirs: Vec<String>,
    /// File basenames classified as third-party code.
    #[serde(default = "default_ignore_files")]
    pub ignore_files: Vec<String>,
}

fn default_ignore_dirs() -> Vec<String> {
    ARKTS_IGNORE_DIRS.iter().map(|s| s.to_string()).collect()
}

fn default_ignore_files() -> Vec<String> {
    ARKTS_IGNORE_FILES.iter().map(|s| s.to_string()).collect()
}

impl Default for LinterOptions {
    fn default() -> Self {
        Self {
            test_mode: false,
            advanced_class_checks: false,
            ignore_dirs: default_ignore_dirs(),
            ignore_files: default_ignore_files(),
        }
    }
}

/// Compiled matcher for the ignore lists.
pub struct IgnoreMatcher {
    globs: GlobSet,
}

impl IgnoreMatcher {
    /// Compile the matcher from the configured lists. Patterns that fail to
    /// compile are skipped; the matcher then fails closed toward "not
    /// ignored", which keeps classification deterministic.
    pub fn compile(options: &LinterOptions) -> Self {
        let mut builder = GlobSetBuilder::new();
        for dir in &options.ignore_dirs {
            if let Ok(glob) = Glob::new(&format!("**/{dir}/**")) {
                builder.add(glob);
            }
            if let Ok(glob) = Glob::new(&format!("{dir}/**")) {
                builder.add(glob);
            }
        }
        for file in &options.ignore_files {
            if let Ok(glob) = Glob::new(&format!("**/{file}")) {
                builder.add(glob);
            }
            if let Ok(glob) = Glob::new(file) {
                builder.add(glob);
            }
        }
        let globs = builder.build().unwrap_or_else(|_| GlobSet::empty());
        Self { globs }
    }

    /// Whether the path falls under an ignore-listed directory or file.
    pub fn is_ignored(&self, path: &str) -> bool {
        self.globs.is_match(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_carry_ignore_lists() {
        let options = LinterOptions::default();
        assert!(options.ignore_dirs.iter().any(|d| d == "node_modules"));
        assert!(options.ignore_files.iter().any(|f| f == "hvigorfile.ts"));
        assert!(!options.test_mode);
        assert!(!options.advanced_class_checks);
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let options: LinterOptions =
            serde_json::from_str(r#"{"test_mode": true}"#).expect("parse options");
        assert!(options.test_mode);
        assert!(!options.advanced_class_checks);
        assert!(options.ignore_dirs.iter().any(|d| d == "oh_modules"));
    }

    #[test]
    fn ignore_matcher_matches_nested_and_root_dirs() {
        let matcher = IgnoreMatcher::compile(&LinterOptions::default());
        assert!(matcher.is_ignored("proj/node_modules/pkg/index.d.ts"));
        assert!(matcher.is_ignored("node_modules/pkg/index.d.ts"));
        assert!(matcher.is_ignored("app/hvigorfile.ts"));
        assert!(!matcher.is_ignored("src/pages/Index.ets"));
    }
}
