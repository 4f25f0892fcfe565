use crate::codegen::module_source;
use crate::error::RibbonResult;
use crate::writer::write_new_file;
use std::path::{Path, PathBuf};

/// Puts generated macro code where the add-in can use it.
///
/// Injecting straight into a workbook's VBA project needs the Excel
/// application itself, so implementations of that live outside this crate.
pub trait CodeInjector {
    /// Deliver `code` for the VBA module `module` of the package at `archive`.
    /// Returns where the code ended up.
    fn inject(&self, archive: &Path, module: &str, code: &str) -> RibbonResult<PathBuf>;
}

/// Writes `{dir}/{module}.bas`, ready for File > Import in the VBA editor.
/// Never overwrites an existing module file.
#[derive(Debug, Clone)]
pub struct ModuleFileInjector {
    dir: PathBuf,
}

impl ModuleFileInjector {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl CodeInjector for ModuleFileInjector {
    fn inject(&self, _archive: &Path, module: &str, code: &str) -> RibbonResult<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(format!("{}.bas", module));
        write_new_file(&path, module_source(module, code).as_bytes())?;
        Ok(path)
    }
}
