use crate::checks::missing_callbacks;
use crate::config::ConfigOverrides;
use crate::error::{RibbonError, RibbonResult};
use crate::package::{ModuleFileInjector, Packager};
use crate::parser::{self, RibbonProject};
use crate::ribbon::Ribbon;
use crate::router::Router;
use crate::writer::write_new_file;
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Project written by `xlribbon init`
pub const STARTER_PROJECT: &str = r#"# xlribbon project
config:
  module_name: xlribbon
  image_dir: img

# callback name -> VBA handler
router:
  onSave: Module1.Save

ribbon:
  kind: tabs
  id: tabs
  label: Tabs
  children:
    - kind: tab
      id: myTab
      label: My Add-in
      children:
        - kind: group
          id: mainGroup
          label: Main
          children:
            - kind: button
              id: saveButton
              label: Save
              imageMso: FileSave
              size: large
              onAction: onSave
            - kind: checkBox
              id: autoSave
              label: Auto save
              size: normal
            - kind: labelControl
              id: status
"#;

/// Load a project, swapping in a standalone router file and CLI overrides
fn load_project(
    model: &Path,
    router: Option<&Path>,
    overrides: &ConfigOverrides,
) -> RibbonResult<RibbonProject> {
    let mut project = parser::parse_project(model)?;
    if let Some(router_path) = router {
        project.router = Router::from_path(router_path)?;
    }
    overrides.apply(&mut project.config);
    project.config.validate()?;
    Ok(project)
}

fn load_ribbon(
    model: &Path,
    router: Option<&Path>,
    overrides: &ConfigOverrides,
    verbose: bool,
) -> RibbonResult<Ribbon> {
    if verbose {
        println!("{}", "📖 Parsing project file...".cyan());
    }
    let project = load_project(model, router, overrides)?;
    if verbose {
        println!(
            "   Root: {} ({} elements), {} routes",
            project.root.id().bright_blue(),
            project.root.node_count(),
            project.router.len()
        );
        println!("{}", "🔗 Checking router and images...".cyan());
    }
    Ribbon::from_project(project)
}

fn print_bindings(ribbon: &Ribbon) {
    for (label, bindings) in [("Getters", ribbon.getters()), ("Setters", ribbon.setters())] {
        if bindings.is_empty() {
            continue;
        }
        println!("   {}:", label);
        for binding in bindings {
            println!(
                "      {} → {} ({})",
                binding.element_id.bright_blue(),
                binding.name.cyan(),
                binding.attr
            );
        }
    }
}

/// Execute the build command: package the ribbon into an add-in
pub fn build(
    model: PathBuf,
    input: PathBuf,
    output: Option<PathBuf>,
    router: Option<PathBuf>,
    overrides: ConfigOverrides,
    verbose: bool,
) -> RibbonResult<()> {
    println!("{}", "🎀 xlribbon - Building add-in".bold().green());
    println!("   Model: {}", model.display());
    println!("   Input: {}\n", input.display());

    let ribbon = load_ribbon(&model, router.as_deref(), &overrides, verbose)?;
    if verbose {
        print_bindings(&ribbon);
        println!("{}", "📦 Rewriting package...".cyan());
    }

    let build_dir = ribbon.config().build_dir.clone();
    let output = match output {
        Some(path) => path,
        None => {
            let name = input.file_name().ok_or_else(|| {
                RibbonError::Package(format!("'{}' is not a file path", input.display()))
            })?;
            build_dir.join(name)
        }
    };

    let injector = ModuleFileInjector::new(&build_dir);
    let report = Packager::new(&ribbon).package(&input, &output, &injector)?;

    println!("{}", "✅ Add-in built".bold().green());
    println!("   Output: {}", report.output.display());
    println!(
        "   {} entries copied, {} written",
        report.copied_entries,
        report.written_entries.len()
    );
    if !report.images.is_empty() {
        println!("   Images: {}", report.images.join(", "));
    }
    match report.injected {
        Some(path) => println!("   Macros: {}", path.display()),
        None => {
            println!(
                "{}",
                "⚠️  Macros were not injected. Copy this code into the VBA module manually:".yellow()
            );
            println!("\n{}", report.macros);
        }
    }
    Ok(())
}

/// Execute the xml command: write the custom-UI XML file
pub fn xml(
    model: PathBuf,
    dir: Option<PathBuf>,
    router: Option<PathBuf>,
    overrides: ConfigOverrides,
    verbose: bool,
) -> RibbonResult<()> {
    let ribbon = load_ribbon(&model, router.as_deref(), &overrides, verbose)?;
    let dir = dir.unwrap_or_else(|| PathBuf::from("."));
    let path = ribbon.write_ui(&dir)?;

    println!("{}", "✅ Custom UI written".bold().green());
    println!("   File: {}", path.display());
    if verbose {
        print_bindings(&ribbon);
    }
    Ok(())
}

/// Execute the macros command: print or write the generated VBA
pub fn macros(
    model: PathBuf,
    write: Option<PathBuf>,
    router: Option<PathBuf>,
    overrides: ConfigOverrides,
) -> RibbonResult<()> {
    let ribbon = load_ribbon(&model, router.as_deref(), &overrides, false)?;
    match write {
        Some(dir) => {
            let path = ribbon.write_macros(&dir)?;
            println!("{}", "✅ Macro module written".bold().green());
            println!("   File: {}", path.display());
        }
        None => print!("{}", ribbon.macros_now()?),
    }
    Ok(())
}

/// Execute the check command: validate model, router and images
pub fn check(
    model: PathBuf,
    router: Option<PathBuf>,
    overrides: ConfigOverrides,
) -> RibbonResult<()> {
    println!("{}", "🔍 xlribbon - Checking project".bold().green());
    println!("   File: {}\n", model.display());

    let ribbon = match load_ribbon(&model, router.as_deref(), &overrides, false) {
        Ok(ribbon) => ribbon,
        Err(e) => {
            println!("{}", format!("❌ {}", e).bold().red());
            return Err(e);
        }
    };

    println!(
        "   {} elements, {} callbacks, {} images",
        ribbon.root().node_count(),
        ribbon.callbacks().len(),
        ribbon.images().len()
    );
    println!(
        "   {} automatic getters, {} automatic setters",
        ribbon.getters().len(),
        ribbon.setters().len()
    );
    println!("\n{}", "✅ Project is valid".bold().green());
    Ok(())
}

/// Execute the callbacks command: list callbacks and router coverage
pub fn callbacks(model: PathBuf, router: Option<PathBuf>) -> RibbonResult<()> {
    let project = load_project(&model, router.as_deref(), &ConfigOverrides::default())?;
    let missing = missing_callbacks(&project.root, &project.router);

    println!("{}", "📋 Callbacks".bold().green());
    let mut seen = Vec::new();
    for callback in crate::binding::collect_callbacks(&project.root) {
        if seen.contains(&callback) {
            continue;
        }
        match project.router.handler(&callback) {
            Some(handler) => println!("   {} {} → {}", "✅".green(), callback, handler.cyan()),
            None => println!("   {} {} (not routed)", "❌".red(), callback.red()),
        }
        seen.push(callback);
    }
    if seen.is_empty() {
        println!("   (none)");
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(RibbonError::Configuration(format!(
            "{} callback(s) missing from the router",
            missing.len()
        )))
    }
}

/// Execute the init command: write a starter project
pub fn init(path: PathBuf) -> RibbonResult<()> {
    write_new_file(&path, STARTER_PROJECT.as_bytes())?;
    println!("{}", "✅ Starter project created".bold().green());
    println!("   File: {}", path.display());
    println!("   Next: xlribbon check {}", path.display());
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
