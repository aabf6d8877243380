use std::io::Write;

use anyhow::{Context, Result};
use hearing_core::calculations::common::parse_decimal;
use hearing_core::calculations::{diagnose, discount_percent, number_to_words};
use hearing_core::store::MemoryStoreFactory;
use hearing_core::{FieldId, FormSession, StoreRegistry, TrialField};
use hearing_db_sqlite::SqliteStoreFactory;
use serde_json::json;
use tracing::{debug, info};

use crate::cli::{Command, TrialCommand};
use crate::config::Settings;
use crate::report::{render_report, render_trials};

/// Every storage backend this binary can use.
pub fn build_registry() -> StoreRegistry {
    let mut registry = StoreRegistry::new();
    registry.register(Box::new(SqliteStoreFactory));
    registry.register(Box::new(MemoryStoreFactory));
    registry
}

pub async fn open_session(settings: &Settings) -> Result<FormSession> {
    debug!(backend = %settings.store.backend, "Opening form store");
    let store = build_registry()
        .create(&settings.store)
        .await
        .with_context(|| format!("Failed to open {} store", settings.store.backend))?;
    FormSession::open(store, settings.state_key.clone())
        .await
        .context("Failed to restore saved form")
}

/// Runs one command, opening the store only if the command needs it.
pub async fn run<W: Write>(settings: &Settings, command: Command, out: &mut W) -> Result<()> {
    if let Some(result) = calculate(&command) {
        writeln!(out, "{result}")?;
        return Ok(());
    }
    let mut session = open_session(settings).await?;
    execute(&mut session, command, out).await
}

/// Output of the commands that only run a calculator.
fn calculate(command: &Command) -> Option<String> {
    let result = match command {
        Command::Words { value } => number_to_words(value),
        Command::Diagnose { ac, bc } => diagnose(*ac, *bc),
        Command::Discount { mrp, price } => {
            discount_percent(parse_decimal(mrp), parse_decimal(price))
        }
        _ => return None,
    };
    Some(result)
}

fn parse_field(key: &str) -> Result<FieldId> {
    key.parse()
        .context("Run `hearing-report fields` to list field names")
}

fn parse_trial_field(key: &str) -> Result<TrialField> {
    key.parse().with_context(|| {
        let names: Vec<_> = TrialField::ALL.iter().map(TrialField::key).collect();
        format!("Trial fields are: {}", names.join(", "))
    })
}

/// Runs one command against an open session.
pub async fn execute<W: Write>(
    session: &mut FormSession,
    command: Command,
    out: &mut W,
) -> Result<()> {
    match command {
        Command::Show { json: true } => {
            let document = json!({
                "form": session.snapshot(),
                "preview": session.preview(),
            });
            writeln!(out, "{}", serde_json::to_string_pretty(&document)?)?;
        }
        Command::Show { json: false } => {
            write!(out, "{}", render_report(session.snapshot(), &session.preview()))?;
        }
        Command::Fields => {
            for field in FieldId::all() {
                writeln!(out, "{:<22} {}", field.key(), session.snapshot().field_value(field))?;
            }
        }
        Command::Set { field, value } => {
            let field = parse_field(&field)?;
            session.set_field(field, &value).await?;
            info!(field = %field, "Field updated");
        }
        Command::Audiogram {
            ear,
            conduction,
            frequency,
            db,
        } => {
            let field = FieldId::Threshold(ear, conduction, frequency);
            session.set_field(field, db.as_deref().unwrap_or_default()).await?;
            info!(field = %field, "Threshold updated");
        }
        Command::Trial(trial) => execute_trial(session, trial, out).await?,
        Command::Clear => {
            session.clear().await?;
            writeln!(out, "Cleared saved form '{}'", session.key())?;
        }
        Command::Dump => writeln!(out, "{}", session.blob())?,
        Command::Load { file } => {
            let blob = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            session
                .replace_from_blob(&blob)
                .await
                .with_context(|| format!("Failed to load {}", file.display()))?;
            writeln!(out, "Loaded form from {}", file.display())?;
        }
        Command::ExportName => writeln!(out, "{}", session.preview().export_filename)?,
        Command::Words { .. } | Command::Diagnose { .. } | Command::Discount { .. } => {
            writeln!(out, "{}", calculate(&command).unwrap_or_default())?;
        }
    }
    Ok(())
}

async fn execute_trial<W: Write>(
    session: &mut FormSession,
    command: TrialCommand,
    out: &mut W,
) -> Result<()> {
    match command {
        TrialCommand::Add {
            model,
            device_type,
            fitting,
            sds,
            satisfaction,
            supplier,
        } => {
            let values = [
                (TrialField::Model, model),
                (TrialField::DeviceType, device_type),
                (TrialField::Fitting, fitting),
                (TrialField::Sds, sds),
                (TrialField::Satisfaction, satisfaction),
                (TrialField::Supplier, supplier),
            ];
            let id = session
                .add_trial(|trial| {
                    for (field, value) in &values {
                        if let Some(value) = value {
                            trial.set_field_value(*field, value)?;
                        }
                    }
                    Ok(())
                })
                .await?;
            writeln!(out, "Added trial {id}")?;
        }
        TrialCommand::Set { id, field, value } => {
            let field = parse_trial_field(&field)?;
            session.set_trial_field(id, field, &value).await?;
            info!(trial = id, field = field.key(), "Trial updated");
        }
        TrialCommand::Remove { id } => {
            session.remove_trial(id).await?;
            writeln!(out, "Removed trial {id}")?;
        }
        TrialCommand::List => {
            write!(out, "{}", render_trials(session.snapshot().trials.as_slice()))?
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use hearing_core::MemoryStore;
    use pretty_assertions::assert_eq;

    use super::*;

    async fn memory_session() -> FormSession {
        FormSession::open(Box::new(MemoryStore::new()), "test").await.unwrap()
    }

    async fn output(session: &mut FormSession, command: Command) -> String {
        let mut out = Vec::new();
        execute(session, command, &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    fn set(field: &str, value: &str) -> Command {
        Command::Set {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn calculators_need_no_store() {
        assert_eq!(
            calculate(&Command::Words { value: "1234567".to_string() }).as_deref(),
            Some("Twelve Lakh Thirty Four Thousand Five Hundred Sixty Seven only")
        );
        let discount = Command::Discount {
            mrp: "1000".to_string(),
            price: "750".to_string(),
        };
        assert_eq!(calculate(&discount).as_deref(), Some("(25.00% off)"));
        assert_eq!(calculate(&Command::Dump), None);
    }

    #[tokio::test]
    async fn run_with_memory_backend() {
        let mut settings = Settings::default();
        settings.store.backend = "memory".to_string();
        let mut out = Vec::new();

        run(&settings, Command::ExportName, &mut out).await.unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "Hearing_Aid_Report.pdf\n");
    }

    #[tokio::test]
    async fn set_then_export_name() {
        let mut session = memory_session().await;

        output(&mut session, set("echsCardNo", "ECHS 55/7")).await;

        assert_eq!(output(&mut session, Command::ExportName).await, "ECHS_557.pdf\n");
    }

    #[tokio::test]
    async fn unknown_field_is_an_error() {
        let mut session = memory_session().await;
        let mut out = Vec::new();

        let result = execute(&mut session, set("hospital", "x"), &mut out).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn trial_add_and_list() {
        let mut session = memory_session().await;

        let added = output(
            &mut session,
            Command::Trial(TrialCommand::Add {
                model: Some("Audeo".to_string()),
                device_type: Some("RIC".to_string()),
                fitting: None,
                sds: None,
                satisfaction: Some("8".to_string()),
                supplier: None,
            }),
        )
        .await;
        let listed = output(&mut session, Command::Trial(TrialCommand::List)).await;

        assert_eq!(added, "Added trial 2\n");
        assert_eq!(listed.lines().count(), 2);
        assert!(listed.lines().nth(1).unwrap_or_default().starts_with("#2   Audeo"));
        assert_eq!(session.snapshot().selected_model, "Audeo");
    }

    #[tokio::test]
    async fn dump_then_load_restores_form() {
        let mut session = memory_session().await;
        output(&mut session, set("patientName", "Ram")).await;
        let blob = output(&mut session, Command::Dump).await;
        let path = std::env::temp_dir()
            .join(format!("hearing-cli-dump-{}.json", std::process::id()));
        std::fs::write(&path, blob).unwrap();

        let mut fresh = memory_session().await;
        output(&mut fresh, Command::Load { file: path.clone() }).await;

        assert_eq!(fresh.snapshot(), session.snapshot());
        let _ = std::fs::remove_file(&path);
    }
}
