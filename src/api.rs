use crate::{
    classify::{Classifier, MARKER_FILE},
    config::{self, BuildConfig},
    descriptor::{self, Descriptors, ProjectSettings, FILTERS_SUFFIX},
    errors::IoError,
    filter::PathFilter,
    staging::StagedOutput,
    tree,
};
use std::path::PathBuf;

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum GenerateError {
    #[error("no Makefile found in '{dir}'")]
    #[diagnostic(
        code(vcxgen::missing_makefile),
        help("Point LOCAL_ROOT_DIR and RELATIVE_DIR at the directory holding the Makefile")
    )]
    MissingMakefile { dir: PathBuf },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Scan(#[from] tree::ScanError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Descriptor(#[from] descriptor::DescriptorError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Io(#[from] IoError),
}

/// Inputs of one generation run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub local_root_dir: PathBuf,
    /// Makefile directory below `local_root_dir`; reused below the remote root.
    pub relative_dir: String,
    pub remote_root_dir: String,
    /// Project file name, written next to the Makefile.
    pub output_file: String,
    pub config_file: PathBuf,
    pub copy_sources: bool,
    pub include_search_path: String,
    pub remote_build_outputs: String,
    pub out_dir: String,
}

impl GenerateOptions {
    /// Directory that is scanned and receives both descriptors.
    pub fn project_dir(&self) -> PathBuf {
        self.local_root_dir.join(&self.relative_dir)
    }

    pub fn filters_file(&self) -> String {
        format!("{}{}", self.output_file, FILTERS_SUFFIX)
    }

    fn settings(&self) -> ProjectSettings {
        ProjectSettings {
            project_name: self.output_file.clone(),
            remote_root_dir: self.remote_root_dir.clone(),
            remote_project_dir: self.relative_dir.replace('\\', "/"),
            copy_sources: self.copy_sources,
            include_search_path: self.include_search_path.clone(),
            remote_build_outputs: self.remote_build_outputs.clone(),
            out_dir: self.out_dir.clone(),
        }
    }
}

/// Generates the project and filter descriptors for the Makefile directory
/// described by `options`, returning the paths that were written.
///
/// # Errors
///
/// Returns a [`GenerateError`] if:
///
/// - The target directory has no `Makefile`.
/// - The build configuration document cannot be read or parsed.
/// - The source tree cannot be walked.
/// - A descriptor fails to render or cannot be written.
///
/// Nothing is written unless every earlier step succeeded.
pub fn generate(options: &GenerateOptions) -> Result<Vec<PathBuf>, GenerateError> {
    let project_dir = options.project_dir();

    if !project_dir.join(MARKER_FILE).is_file() {
        return Err(GenerateError::MissingMakefile { dir: project_dir });
    }

    let config_path = config::resolve_config_path(&options.config_file);
    log::debug!("loading build configuration from {}", config_path.display());
    let config = BuildConfig::from_file(&config_path)?;

    let model = tree::build_model(&project_dir, &PathFilter::default(), &Classifier::default())?;

    let descriptors = Descriptors::new()?;
    let project = descriptors.render_project(&model, &options.settings(), &config)?;
    let filters = descriptors.render_filters(&model)?;

    let mut staged = StagedOutput::new();
    staged.push(
        project_dir.join(&options.output_file),
        descriptor::encode(&project),
    );
    staged.push(
        project_dir.join(options.filters_file()),
        descriptor::encode(&filters),
    );

    Ok(staged.apply()?)
}
