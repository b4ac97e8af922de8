//! Command handlers

use std::path::{Path, PathBuf};

use chrono::Local;
use estimate_core::report::{PdfFileSink, ReportSink, TextFileSink};
use estimate_core::{
    load_settings_or_default, save_settings, ConcreteGrade, EstimateForm, EstimateSession, Settings,
};

use crate::cli::{CalculateArgs, Cli, Commands, ConfigAction, OutputFormat};
use crate::error::{Error, Result};
use crate::output::{output_estimate, output_grades, output_settings};

/// Settings directory name under the platform config directory
pub const APP_DIR: &str = "concrete-estimator";

/// Settings file name
pub const SETTINGS_FILE: &str = "settings.json";

/// Default settings path: `<config dir>/concrete-estimator/settings.json`
pub fn default_settings_path() -> Result<PathBuf> {
    let dir = dirs::config_dir()
        .ok_or_else(|| Error::Config("no platform config directory".to_string()))?
        .join(APP_DIR);
    Ok(dir.join(SETTINGS_FILE))
}

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let settings_path = match &cli.settings {
        Some(path) => path.clone(),
        None => default_settings_path()?,
    };
    if cli.verbose {
        eprintln!("Settings: {}", settings_path.display());
    }

    match &cli.command {
        Commands::Calculate(args) => cmd_calculate(args, &settings_path, cli.format, cli.verbose),
        Commands::Grades => output_grades(cli.format),
        Commands::Config { action } => cmd_config(action, &settings_path, cli.format),
    }
}

/// Fill a session's form from command line arguments.
///
/// Anything not given on the command line keeps the value preset from
/// settings.
pub fn build_session(args: &CalculateArgs, settings: &Settings) -> Result<EstimateSession> {
    let mut session = EstimateSession::new(settings);
    let form = &mut session.form;

    form.label = args.label.clone().unwrap_or_default();
    form.length = args.length.clone();
    form.width = args.width.clone();
    form.height = args.height.clone();

    if let Some(grade) = &args.grade {
        form.grade = ConcreteGrade::from_str_flexible(grade)?;
    }
    if let Some(price) = &args.cement_price {
        form.cement_price = price.clone();
    }
    if let Some(price) = &args.sand_price {
        form.sand_price = price.clone();
    }
    if let Some(price) = &args.gravel_price {
        form.gravel_price = price.clone();
    }

    Ok(session)
}

/// Pick a sink by file extension: `.pdf` renders a PDF, anything else is text
pub fn sink_for(path: &Path) -> Box<dyn ReportSink> {
    let is_pdf = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
    if is_pdf {
        Box::new(PdfFileSink::new(path))
    } else {
        Box::new(TextFileSink::new(path))
    }
}

fn cmd_calculate(args: &CalculateArgs, settings_path: &Path, output_format: OutputFormat, verbose: bool) -> Result<()> {
    let settings = load_settings_or_default(settings_path)?;
    let mut session = build_session(args, &settings)?;

    if session.calculate()?.is_none() {
        return Err(Error::IncompleteDimensions);
    }
    let (Some(input), Some(result)) = (session.latest_input(), session.latest()) else {
        return Err(Error::IncompleteDimensions);
    };

    output_estimate(output_format, input, result, &settings.report.currency_symbol, verbose)?;

    if let Some(path) = &args.report {
        let mut options = settings.report.clone();
        options.include_reference = args.reference;
        let date = Local::now().date_naive();

        let mut sink = sink_for(path);
        session.print(sink.as_mut(), date, &options)?;
        status(output_format, &format!("\nReport written to {}", path.display()));
    }

    Ok(())
}

/// One-line status message. Kept off stdout in JSON mode so the document
/// stays parseable.
fn status(output_format: OutputFormat, message: &str) {
    match output_format {
        OutputFormat::Table => println!("{}", message),
        OutputFormat::Json => eprintln!("{}", message),
    }
}

fn cmd_config(action: &ConfigAction, settings_path: &Path, output_format: OutputFormat) -> Result<()> {
    let load = || load_settings_or_default(settings_path);

    let (settings, message) = match action {
        ConfigAction::Show => return output_settings(output_format, &load()?, settings_path),
        ConfigAction::Reset => (Settings::default(), "Settings reset to defaults"),
        ConfigAction::SetPrices { cement, sand, gravel } => {
            let mut settings = load()?;
            let mut form = EstimateForm::from_settings(&settings);
            if let Some(price) = cement {
                form.cement_price = price.clone();
            }
            if let Some(price) = sand {
                form.sand_price = price.clone();
            }
            if let Some(price) = gravel {
                form.gravel_price = price.clone();
            }
            settings.set_prices(form.prices()?)?;
            (settings, "Settings updated")
        }
        ConfigAction::SetCurrency { symbol } => {
            let mut settings = load()?;
            settings.set_currency(symbol.as_str())?;
            (settings, "Settings updated")
        }
        ConfigAction::SetObject { name } => {
            let mut settings = load()?;
            settings.set_object_name(name.as_str());
            (settings, "Settings updated")
        }
        ConfigAction::SetGrade { grade } => {
            let mut settings = load()?;
            settings.set_default_grade(ConcreteGrade::from_str_flexible(grade)?);
            (settings, "Settings updated")
        }
    };

    save_settings(&settings, settings_path)?;
    status(output_format, message);
    output_settings(output_format, &settings, settings_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use estimate_core::UnitPrices;

    fn args(length: &str, width: &str, height: &str) -> CalculateArgs {
        CalculateArgs {
            length: length.to_string(),
            width: width.to_string(),
            height: height.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_build_session_uses_settings_defaults() {
        let mut settings = Settings::default();
        settings.set_default_grade(ConcreteGrade::M250);
        let session = build_session(&args("2", "3", "0.5"), &settings).unwrap();
        assert_eq!(session.form.grade, ConcreteGrade::M250);
        assert_eq!(session.form.prices().unwrap(), UnitPrices::default());
    }

    #[test]
    fn test_build_session_overrides() {
        let mut a = args("2", "3", "0.5");
        a.grade = Some("m-400".to_string());
        a.sand_price = Some("1000,5".to_string());
        let session = build_session(&a, &Settings::default()).unwrap();
        assert_eq!(session.form.grade, ConcreteGrade::M400);
        assert_eq!(session.form.prices().unwrap().sand_per_tonne, 1000.5);
    }

    #[test]
    fn test_build_session_rejects_unknown_grade() {
        let mut a = args("2", "3", "0.5");
        a.grade = Some("M150".to_string());
        assert!(matches!(build_session(&a, &Settings::default()), Err(Error::Calc(_))));
    }

    #[test]
    fn test_default_settings_path_name() {
        if let Ok(path) = default_settings_path() {
            assert!(path.ends_with(Path::new(APP_DIR).join(SETTINGS_FILE)));
        }
    }
}
