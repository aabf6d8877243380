//! Commands run one after another against a SQLite file, as separate
//! invocations of the binary would.

use hearing_cli::app;
use hearing_cli::cli::{Command, TrialCommand};
use hearing_cli::config::Settings;
use hearing_core::{Conduction, Ear, Frequency, StoreConfig};
use pretty_assertions::assert_eq;

fn settings(name: &str) -> Settings {
    let path = std::env::temp_dir().join(format!("hearing-cli-{name}-{}.db", std::process::id()));
    let _ = std::fs::remove_file(&path);
    Settings {
        store: StoreConfig {
            backend: "sqlite".to_string(),
            connection_string: path.display().to_string(),
        },
        ..Settings::default()
    }
}

async fn run(settings: &Settings, command: Command) -> String {
    let mut out = Vec::new();
    app::run(settings, command, &mut out).await.unwrap();
    String::from_utf8(out).unwrap()
}

fn set(field: &str, value: &str) -> Command {
    Command::Set {
        field: field.to_string(),
        value: value.to_string(),
    }
}

#[tokio::test]
async fn report_reflects_earlier_commands() {
    let settings = settings("report");
    run(&settings, set("patientName", "Hav Prem Chand")).await;
    run(&settings, set("serviceType", "Serving")).await;
    run(&settings, set("mrp", "100000")).await;
    run(&settings, set("discountPrice", "80000")).await;
    for frequency in Frequency::PURE_TONE_AVERAGE {
        run(
            &settings,
            Command::Audiogram {
                ear: Ear::Left,
                conduction: Conduction::Air,
                frequency,
                db: Some("50".to_string()),
            },
        )
        .await;
    }
    run(
        &settings,
        Command::Trial(TrialCommand::Set {
            id: 1,
            field: "satisfaction".to_string(),
            value: "7".to_string(),
        }),
    )
    .await;

    let report = run(&settings, Command::Show { json: false }).await;

    assert!(report.contains("Hav Prem Chand"));
    assert!(report.contains("Service Number"));
    assert!(report.contains("One Lakh only"));
    assert!(report.contains("(20.00% off)"));
    assert!(
        report.contains("Left ear: PTA AC 50 / BC 0 dB, Moderate Conductive Hearing Loss (CHL)")
    );
}

#[tokio::test]
async fn clear_forgets_the_form() {
    let settings = settings("clear");
    run(&settings, set("station", "Ambala")).await;

    run(&settings, Command::Clear).await;
    let blob = run(&settings, Command::Dump).await;

    let value: serde_json::Value = serde_json::from_str(&blob).unwrap();
    assert_eq!(value["station"], "");
}

#[tokio::test]
async fn show_json_contains_form_and_preview() {
    let settings = settings("json");
    run(&settings, set("warranty", "2")).await;

    let text = run(&settings, Command::Show { json: true }).await;

    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["preview"]["warranty_words"], "Two only");
    assert_eq!(value["form"]["pricing"]["warranty_years"], "2");
}
