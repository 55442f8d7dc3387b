use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use toml_edit::{Document, Item, Table};

/// The caller's `Cargo.toml`, used to find how a sibling crate is named
/// from the crate invoking a macro.
///
/// # Example
///
/// ```rust
/// # use qp_macro_utils::Manifest;
/// let p: syn::Path = Manifest::shared(|m| m.get_crate_path("qp_params"));
/// ```
///
/// # Resolution rules
///
/// 1. The caller is the facade package `qp_core` and `name` starts with `qp_`:
///    `::qp_core::short_name` (`qp_params` -> `::qp_core::params`).
/// 2. `name` is listed in `dependencies`: `::name`.
/// 3. `name` starts with `qp_` and `qp_core` is listed in `dependencies`:
///    `::qp_core::short_name`.
/// 4. Steps 2-3 against `dev-dependencies`.
/// 5. Otherwise `::name`.
///
/// A crate deriving on its own types should declare
/// `extern crate self as qp_params;` so the fallback path resolves.
#[derive(Debug)]
pub struct Manifest {
    pub manifest: Document<Box<str>>,
    pub modified_time: SystemTime,
}

const FACADE_NAME: &str = "qp_core";
const CRATE_PREFIX: &str = "qp_";

impl Manifest {
    #[inline(never)]
    fn get_manifest_path() -> PathBuf {
        env::var_os("CARGO_MANIFEST_DIR")
            .map(|path| {
                let mut path = PathBuf::from(path);
                path.push("Cargo.toml");
                assert!(
                    path.exists(),
                    "Cargo manifest does not exist at path {}",
                    path.display(),
                );
                path
            })
            .expect("CARGO_MANIFEST_DIR should be auto-defined by cargo.")
    }

    #[inline(never)]
    fn get_manifest_modified_time(path: &Path) -> Result<SystemTime, std::io::Error> {
        std::fs::metadata(path).and_then(|metadata| metadata.modified())
    }

    #[inline(never)]
    fn read_manifest(path: &Path) -> Document<Box<str>> {
        let manifest = std::fs::read_to_string(path)
            .unwrap_or_else(|_| panic!("Unable to read cargo manifest: {}", path.display()))
            .into_boxed_str();
        Document::parse(manifest)
            .unwrap_or_else(|_| panic!("Failed to parse cargo manifest: {}", path.display()))
    }

    fn facade_path(module: &str) -> syn::Path {
        let mut path: syn::Path = syn::parse_str(&format!("::{FACADE_NAME}")).unwrap();
        path.segments.push(syn::parse_str(module).unwrap());
        path
    }

    fn find_in_deps(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Some(syn::parse_str(&format!("::{name}")).unwrap());
        }
        match name.strip_prefix(CRATE_PREFIX) {
            Some(module) if deps.contains_key(FACADE_NAME) => Some(Self::facade_path(module)),
            _ => None,
        }
    }

    fn package_name(&self) -> Option<&str> {
        self.manifest.get("package")?.get("name")?.as_str()
    }

    /// Returns the path of crate `name` as seen from the caller.
    ///
    /// See the type-level documentation for the lookup order.
    #[inline(never)]
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        if self.package_name() == Some(FACADE_NAME)
            && let Some(module) = name.strip_prefix(CRATE_PREFIX)
        {
            return Self::facade_path(module);
        }

        for section in ["dependencies", "dev-dependencies"] {
            if let Some(Item::Table(deps)) = self.manifest.get(section)
                && let Some(path) = Self::find_in_deps(deps, name)
            {
                return path;
            }
        }

        syn::parse_str(&format!("::{name}")).unwrap()
    }

    /// Runs `func` with the caller's manifest.
    ///
    /// Parsed manifests are cached per path and reloaded when the file's
    /// modification time changes. Call this once per macro invocation and
    /// pass the resulting path around.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let manifest_path = Self::get_manifest_path();
        let modified_time = Self::get_manifest_modified_time(&manifest_path)
            .expect("The Cargo.toml should have a modified time.");

        let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);

        if let Some(manifest) = manifests.get(&manifest_path)
            && manifest.modified_time == modified_time
        {
            return func(manifest);
        }

        drop(manifests);

        let manifest = Manifest {
            manifest: Self::read_manifest(&manifest_path),
            modified_time,
        };

        let result = func(&manifest);

        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(manifest_path, manifest);

        result
    }
}

#[cfg(test)]
mod tests {
    use super::Manifest;
    use std::time::SystemTime;
    use toml_edit::Document;

    fn path_string(path: &syn::Path) -> String {
        let segments: Vec<String> = path
            .segments
            .iter()
            .map(|s| s.ident.to_string())
            .collect();
        format!("::{}", segments.join("::"))
    }

    fn manifest(text: &str) -> Manifest {
        Manifest {
            manifest: Document::parse(text.to_owned().into_boxed_str()).unwrap(),
            modified_time: SystemTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn direct_dependency() {
        let m = manifest("[package]\nname = \"app\"\n[dependencies]\nqp_params = \"0.0.1\"\n");
        assert_eq!(path_string(&m.get_crate_path("qp_params")), "::qp_params");
    }

    #[test]
    fn through_facade() {
        let m = manifest("[package]\nname = \"app\"\n[dev-dependencies]\nqp_core = \"0.0.1\"\n");
        assert_eq!(path_string(&m.get_crate_path("qp_params")), "::qp_core::params");
    }

    #[test]
    fn facade_itself() {
        let m = manifest("[package]\nname = \"qp_core\"\n[dependencies]\nqp_params = \"0.0.1\"\n");
        assert_eq!(path_string(&m.get_crate_path("qp_params")), "::qp_core::params");
    }

    #[test]
    fn fallback() {
        let m = manifest("[package]\nname = \"qp_params\"\n");
        assert_eq!(path_string(&m.get_crate_path("qp_params")), "::qp_params");
    }
}
