use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use fallible_iterator::FallibleIterator;

pub mod config;
pub mod error;
mod toolchain;

pub use config::GeneratorConfig;
pub use error::{Error, ToolFailure};

const FOREIGN_TYPES_PREFIX: &str = "qt6qml_";
const FOREIGN_TYPES_SUFFIX: &str = "metatypes.json";

/// Produce the QML type registration translation unit and the `.qmltypes`
/// descriptor for the Frida module from the preprocessed sources in
/// `config`.
pub fn generate(config: &GeneratorConfig) -> Result<(), Error> {
    let metadir = resolve_metatypes_dir(config)?;
    let foreign_types = find_foreign_types(&metadir)?;
    log::debug!("using foreign types from {}", foreign_types.display());

    fs::create_dir_all(&config.private_dir).map_err(|source| Error::Io {
        path: config.private_dir.clone(),
        source,
    })?;

    let metatypes = config.private_dir.join("metatypes.json");

    let mut collect = Command::new(config.qt_libexecdir.join("moc"));
    collect.arg("--collect-json").arg("-o").arg(&metatypes);
    for source in &config.sources {
        collect.arg(sidecar_path(source));
    }
    toolchain::run_tool(collect)?;
    log::info!("collected metatypes into {}", metatypes.display());

    let mut register = Command::new(config.qt_libexecdir.join("qmltyperegistrar"));
    register
        .arg(format!(
            "--generate-qmltypes={}",
            config.qmltypes_out.display()
        ))
        .arg("--import-name=Frida")
        .arg("--major-version=1")
        .arg("--minor-version=0")
        .arg(format!("--foreign-types={}", foreign_types.display()))
        .arg("-o")
        .arg(&config.registration_out)
        .arg(&metatypes);
    toolchain::run_tool(register)?;
    log::info!(
        "wrote type registrations to {}",
        config.registration_out.display()
    );

    Ok(())
}

/// `qt_libdir/metatypes` wins over `qt_prefix/metatypes` when both exist.
fn resolve_metatypes_dir(config: &GeneratorConfig) -> Result<PathBuf, Error> {
    let preferred = config.qt_libdir.join("metatypes");
    if preferred.exists() {
        return Ok(preferred);
    }

    let fallback = config.qt_prefix.join("metatypes");
    if fallback.exists() {
        return Ok(fallback);
    }

    Err(Error::MetatypesDirNotFound {
        libdir: preferred,
        prefix: fallback,
    })
}

/// Lexicographically first entry matching `qt6qml_*metatypes.json`, so the
/// choice stays stable when an installation ships several candidates.
fn find_foreign_types(metadir: &Path) -> Result<PathBuf, Error> {
    let entries = fs::read_dir(metadir).map_err(|source| Error::Io {
        path: metadir.to_path_buf(),
        source,
    })?;

    let mut candidates: Vec<PathBuf> = fallible_iterator::convert(entries)
        .filter_map(|entry| {
            let path = entry.path();
            Ok(is_foreign_types_name(&path).then_some(path))
        })
        .collect()
        .map_err(|source| Error::Io {
            path: metadir.to_path_buf(),
            source,
        })?;

    candidates.sort();
    if candidates.len() > 1 {
        log::debug!(
            "{} foreign-types candidates in {}, keeping the first",
            candidates.len(),
            metadir.display()
        );
    }

    candidates
        .into_iter()
        .next()
        .ok_or_else(|| Error::ForeignTypesNotFound(metadir.to_path_buf()))
}

fn is_foreign_types_name(path: &Path) -> bool {
    match path.file_name().and_then(|name| name.to_str()) {
        Some(name) => {
            name.len() >= FOREIGN_TYPES_PREFIX.len() + FOREIGN_TYPES_SUFFIX.len()
                && name.starts_with(FOREIGN_TYPES_PREFIX)
                && name.ends_with(FOREIGN_TYPES_SUFFIX)
        }
        None => false,
    }
}

/// The metadata sidecar an earlier build step left next to each source:
/// `dir/a.cpp` -> `dir/a.cpp.json`.
fn sidecar_path(source: &Path) -> PathBuf {
    let mut path = source.as_os_str().to_os_string();
    path.push(".json");
    PathBuf::from(path)
}

#[test]
fn sidecar_keeps_the_source_directory() {
    assert_eq!(
        sidecar_path(Path::new("src/device.cpp")),
        PathBuf::from("src/device.cpp.json")
    );
    assert_eq!(sidecar_path(Path::new("frida.cpp")), PathBuf::from("frida.cpp.json"));
}

#[test]
fn foreign_types_name_matching() {
    assert!(is_foreign_types_name(Path::new(
        "/usr/lib/qt6/metatypes/qt6qml_relwithdebinfo_metatypes.json"
    )));
    assert!(is_foreign_types_name(Path::new("qt6qml_metatypes.json")));
    assert!(!is_foreign_types_name(Path::new("qt6core_metatypes.json")));
    assert!(!is_foreign_types_name(Path::new("qt6qml_metatypes.json.bak")));
    assert!(!is_foreign_types_name(Path::new("qt6qml_")));
}
