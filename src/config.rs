use std::path::PathBuf;

use crate::error::Error;

/// The fixed positional paths the build system hands over, plus the
/// variadic list of preprocessed source files.
#[derive(Debug)]
pub struct GeneratorConfig {
    pub registration_out: PathBuf,
    pub qmltypes_out: PathBuf,
    pub private_dir: PathBuf,
    pub qt_prefix: PathBuf,
    pub qt_libdir: PathBuf,
    pub qt_libexecdir: PathBuf,
    pub sources: Vec<PathBuf>,
}

impl GeneratorConfig {
    pub fn from_args<I: Iterator<Item = String>>(mut args: I) -> Result<Self, Error> {
        let mut next = |name: &'static str| {
            args.next()
                .map(PathBuf::from)
                .ok_or(Error::MissingArgument(name))
        };

        let registration_out = next("registration_output")?;
        let qmltypes_out = next("qmltypes_output")?;
        let private_dir = next("private_dir")?;
        let qt_prefix = next("qt_prefix")?;
        let qt_libdir = next("qt_libdir")?;
        let qt_libexecdir = next("qt_libexecdir")?;

        let sources: Vec<PathBuf> = args.map(PathBuf::from).collect();
        if sources.is_empty() {
            return Err(Error::NoSources);
        }

        Ok(Self {
            registration_out,
            qmltypes_out,
            private_dir,
            qt_prefix,
            qt_libdir,
            qt_libexecdir,
            sources,
        })
    }
}

#[test]
fn parse_names_first_missing_argument() {
    let err = GeneratorConfig::from_args(
        ["regs.cpp", "plugin.qmltypes"]
            .into_iter()
            .map(str::to_string),
    )
    .unwrap_err();

    assert!(matches!(err, Error::MissingArgument("private_dir")));
}

#[test]
fn parse_rejects_empty_source_list() {
    let err = GeneratorConfig::from_args(
        ["regs.cpp", "plugin.qmltypes", "priv", "/usr", "/usr/lib/qt6", "/usr/lib/qt6/libexec"]
            .into_iter()
            .map(str::to_string),
    )
    .unwrap_err();

    assert!(matches!(err, Error::NoSources));
}

#[test]
fn parse_collects_all_sources() {
    let config = GeneratorConfig::from_args(
        [
            "regs.cpp",
            "plugin.qmltypes",
            "priv",
            "/usr",
            "/usr/lib/qt6",
            "/usr/lib/qt6/libexec",
            "a.cpp",
            "b.cpp",
        ]
        .into_iter()
        .map(str::to_string),
    )
    .unwrap();

    assert_eq!(config.qt_libexecdir, PathBuf::from("/usr/lib/qt6/libexec"));
    assert_eq!(
        config.sources,
        vec![PathBuf::from("a.cpp"), PathBuf::from("b.cpp")]
    );
}
