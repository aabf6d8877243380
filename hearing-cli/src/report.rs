//! Plain-text rendering of the report preview.

use std::fmt::Write;

use hearing_core::preview::{IssueVariant, Visibility};
use hearing_core::{Conduction, Ear, FormSnapshot, Frequency, ReportPreview, TrialRecord};
use rust_decimal::Decimal;

const BLANK: &str = "-";

fn or_blank(value: &str) -> &str {
    if value.is_empty() { BLANK } else { value }
}

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n{title}\n{}", "=".repeat(title.len()));
}

fn line(out: &mut String, label: &str, value: &str) {
    let _ = writeln!(out, "{label:<22} {}", or_blank(value));
}

/// Renders the full report as it would be printed.
pub fn render_report(snapshot: &FormSnapshot, preview: &ReportPreview) -> String {
    let mut out = String::from("HEARING AID REPORT\n");
    patient_section(&mut out, snapshot, preview);
    clinical_section(&mut out, snapshot);
    audiogram_section(&mut out, snapshot, preview);
    trials_section(&mut out, preview);
    pricing_section(&mut out, snapshot, preview);
    consent_section(&mut out, snapshot, preview);
    let _ = writeln!(out, "\nExport file: {}", preview.export_filename);
    out
}

fn patient_section(out: &mut String, snapshot: &FormSnapshot, preview: &ReportPreview) {
    let patient = &snapshot.patient;
    let id = &preview.identification;
    heading(out, "Part 1: Patient");
    line(out, "Name", &patient.name);
    line(out, "Age / Sex", &preview.age_sex);
    line(out, id.label, &id.card_no);
    if preview.visibility.related_person {
        let related = format!(
            "{} {}",
            preview.relation_prefix.unwrap_or_default(),
            or_blank(&patient.related_name)
        );
        line(out, "Relation", &related);
        if preview.visibility.related_identification {
            line(out, &id.related_preview_label, &id.related_card_no);
        }
    }
    line(out, "Contact No", &patient.contact_no);
    line(out, "ECHS Polyclinic", &patient.polyclinic);
    line(out, "Service", snapshot.service.service_type.as_str());
    if preview.visibility.serving_sections {
        line(out, "Rank", &snapshot.service.rank);
        line(out, "Issue", snapshot.service.issue_type.as_str());
    }
    if preview.visibility.subsequent_issue_details {
        line(out, "Previous issue date", &snapshot.service.prev_issue_date);
        line(out, "Previous model", &snapshot.service.prev_model_name);
    }
}

fn clinical_section(out: &mut String, snapshot: &FormSnapshot) {
    let clinical = &snapshot.clinical;
    heading(out, "Part 2: Clinical Findings");
    line(out, "Hearing test date", &clinical.hearing_test_date);
    line(out, "Audiologist", &clinical.audiologist_name);
    for (n, complaint) in clinical.complaints.iter().enumerate() {
        if !complaint.is_empty() {
            let _ = writeln!(out, "  {}. {complaint}", n + 1);
        }
    }
    line(out, "Ear affected", clinical.ear_affected.as_str());
}

fn audiogram_section(out: &mut String, snapshot: &FormSnapshot, preview: &ReportPreview) {
    heading(out, "Part 3: Audiogram (dB HL)");
    let columns = [
        (Ear::Right, Conduction::Air),
        (Ear::Right, Conduction::Bone),
        (Ear::Left, Conduction::Air),
        (Ear::Left, Conduction::Bone),
    ];
    let _ = writeln!(out, "{:>6} {:>8} {:>8} {:>8} {:>8}", "Hz", "R AC", "R BC", "L AC", "L BC");
    for frequency in Frequency::ALL {
        let _ = write!(out, "{:>6}", frequency.hz());
        for (ear, conduction) in columns {
            let cell = snapshot
                .audiogram
                .ear(ear)
                .conduction(conduction)
                .get(frequency)
                .map_or_else(|| BLANK.to_string(), |db| db.to_string());
            let _ = write!(out, " {cell:>8}");
        }
        let _ = writeln!(out);
    }
    for diagnosis in &preview.diagnoses {
        let _ = writeln!(
            out,
            "{} ear: PTA AC {} / BC {} dB, {}",
            diagnosis.ear.as_str(),
            diagnosis.ac_average,
            diagnosis.bc_average,
            diagnosis.diagnosis
        );
    }
}

fn trials_section(out: &mut String, preview: &ReportPreview) {
    heading(out, "Part 4: Hearing Aid Trials");
    let _ = writeln!(
        out,
        "{:<4} {:<20} {:<5} {:<10} {:<6} {:<12} {}",
        "Rank", "Model", "Type", "Fitting", "SDS", "Satisfaction", "Supplier"
    );
    for ranked in &preview.ranked_trials {
        let trial = &ranked.trial;
        let _ = writeln!(
            out,
            "{:<4} {:<20} {:<5} {:<10} {:<6} {:<12} {}",
            ranked.rank,
            trial.model,
            trial.device_type.as_str(),
            trial.fitting.as_str(),
            trial.sds,
            ranked.satisfaction_display(),
            trial.supplier
        );
    }
    line(out, "Selected model", &preview.selected.model);
    line(out, "Selected supplier", &preview.selected.supplier);
}

fn pricing_section(out: &mut String, snapshot: &FormSnapshot, preview: &ReportPreview) {
    let pricing = &snapshot.pricing;
    heading(out, "Part 5: Cost");
    line(out, "MRP", &with_words(pricing.mrp, &preview.mrp_words));
    let discount = with_words(pricing.discount_price, &preview.discount_price_words);
    let discount = format!("{discount} {}", preview.discount_percent);
    line(out, "Discount price", discount.trim());
    line(out, "Warranty (years)", &with_words(pricing.warranty_years, &preview.warranty_words));
    let _ = writeln!(out, "{}", preview.recommendation);
}

fn with_words(value: Option<Decimal>, words: &str) -> String {
    value.map(|value| format!("{value} ({words})")).unwrap_or_default()
}

fn consent_section(out: &mut String, snapshot: &FormSnapshot, preview: &ReportPreview) {
    heading(out, "Part 6: Consent and Certificates");
    let _ = writeln!(out, "{}", preview.consent);
    line(out, "Station", &snapshot.consent.station);
    line(out, "Date", &snapshot.consent.consent_date);
    for (n, doctor) in snapshot.consent.doctors.iter().enumerate() {
        let signed = format!("{} {}", doctor.rank, doctor.name);
        line(out, &format!("Doctor {}", n + 1), signed.trim());
    }
    certificates(out, preview, preview.visibility);
}

fn certificates(out: &mut String, preview: &ReportPreview, visibility: Visibility) {
    if visibility.serving_sections {
        let cert = &preview.serving_certificate;
        let _ = writeln!(
            out,
            "\nService No {}, Rank {}, Name {}. Hearing aid for {} ({}), age {}, ear affected: {}.",
            cert.service_no,
            cert.rank,
            cert.name,
            cert.dependent_name,
            cert.relation,
            cert.dependent_age,
            cert.ear_affected
        );
        match &cert.issue {
            IssueVariant::FirstTime => {
                let _ = writeln!(out, "This is the first issue of a hearing aid.");
            }
            IssueVariant::Subsequent {
                prev_issue_date,
                prev_model_name,
            } => {
                let _ = writeln!(
                    out,
                    "This is a subsequent issue; the previous hearing aid ({}) was issued on {}.",
                    or_blank(prev_model_name),
                    or_blank(prev_issue_date)
                );
            }
        }
    }
    if visibility.ex_serviceman_certificates {
        let cert = &preview.ex_serviceman_certificate;
        for n in 1..=2 {
            let _ = writeln!(
                out,
                "\nCertificate {n}: {}, {}, card held by {}.",
                cert.name, cert.identification, cert.relation_info
            );
        }
    }
}

/// One line per trial in entry order, with ids for `trial set`.
pub fn render_trials(trials: &[TrialRecord]) -> String {
    let mut out = String::new();
    for trial in trials {
        let _ = writeln!(
            out,
            "#{:<3} {:<20} {:<5} {:<10} sds={:<6} satisfaction={:<3} supplier={}",
            trial.id,
            or_blank(&trial.model),
            trial.device_type.as_str(),
            trial.fitting.as_str(),
            or_blank(&trial.sds),
            trial.satisfaction.map_or_else(|| BLANK.to_string(), |s| s.to_string()),
            or_blank(&trial.supplier)
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn blank_report_has_every_part() {
        let snapshot = FormSnapshot::default();

        let text = render_report(&snapshot, &ReportPreview::reconcile(&snapshot));

        for part in 1..=6 {
            assert!(text.contains(&format!("Part {part}:")), "missing part {part}");
        }
        assert!(text.contains("Certificate 2:"));
        assert!(!text.contains("Rank  "));
        assert!(text.ends_with("Export file: Hearing_Aid_Report.pdf\n"));
    }

    #[test]
    fn trials_list_shows_ids() {
        let mut trial = TrialRecord::new(3);
        trial.model = "Audeo".to_string();
        trial.satisfaction = Some(8);

        let text = render_trials(&[trial]);

        assert_eq!(
            text,
            "#3   Audeo                BTE   Monoaural  sds=-      satisfaction=8   supplier=-\n"
        );
    }
}
