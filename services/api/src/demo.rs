use crate::infra::{InMemoryApplicationRepository, InMemoryAuditRecorder};
use chrono::{Local, NaiveDate};
use clap::Args;
use std::sync::Arc;

use hsa_onboarding::error::AppError;
use hsa_onboarding::workflows::onboarding::{
    ApplicantSubmission, DecisionConfig, ExtractedEmployerDocument, ExtractedIdentityDocument,
    MailingAddress, OnboardingService,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Reference date for the expiry checks (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) reference_date: Option<NaiveDate>,
    /// Print the full field-by-field match trace for each scenario.
    #[arg(long)]
    pub(crate) show_trace: bool,
}

struct Scenario {
    title: &'static str,
    id_document: Option<ExtractedIdentityDocument>,
    employer_document: Option<ExtractedEmployerDocument>,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let reference_date = args.reference_date.unwrap_or_else(|| Local::now().date_naive());

    let repository = Arc::new(InMemoryApplicationRepository::default());
    let audit = Arc::new(InMemoryAuditRecorder::default());
    let service = OnboardingService::new(repository, audit.clone(), DecisionConfig::default());

    println!("HSA onboarding decisioning demo (reference date {reference_date})");

    for scenario in scenarios(reference_date) {
        println!("\n== {} ==", scenario.title);

        let record = match service.submit(applicant()) {
            Ok(record) => record,
            Err(err) => {
                println!("  intake refused the submission: {err}");
                continue;
            }
        };
        let id = record.applicant.application_id.clone();

        if let Err(err) =
            service.attach_documents(&id, scenario.id_document, scenario.employer_document)
        {
            println!("  attaching documents failed: {err}");
            continue;
        }

        match service.decide(&id, Some(reference_date)) {
            Ok(outcome) => {
                println!("  application: {}", id.0);
                println!("  decision:    {}", outcome.decision.label());
                println!("  explanation: {}", outcome.explanation);
                println!("  risk score:  {:.3}", outcome.risk_score);
                if args.show_trace {
                    for result in &outcome.field_matches {
                        let verdict = if result.is_match { "match" } else { "MISMATCH" };
                        let reason = result.reason.as_deref().unwrap_or("-");
                        println!(
                            "    {:<14} {:<8} confidence {:.2}  {}",
                            result.field.label(),
                            verdict,
                            result.confidence,
                            reason
                        );
                    }
                }
            }
            Err(err) => println!("  decisioning failed: {err}"),
        }
    }

    println!(
        "\nAudit trail entries recorded: {}",
        audit.entries().len()
    );

    Ok(())
}

fn applicant() -> ApplicantSubmission {
    ApplicantSubmission {
        full_name: "Jane A. Doe".to_string(),
        date_of_birth: "1990-05-01".to_string(),
        address: MailingAddress {
            street: "123 Main St.".to_string(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            zip: "62704".to_string(),
        },
        social_security_number: "123-45-6789".to_string(),
        employer_name: "Acme Corporation".to_string(),
    }
}

fn clean_id(reference_date: NaiveDate) -> ExtractedIdentityDocument {
    ExtractedIdentityDocument {
        document_kind: Some("driver's license".to_string()),
        id_number: Some("123456789".to_string()),
        full_name: Some("Jane Doe".to_string()),
        date_of_birth: Some("1990-05-01".to_string()),
        address_street: Some("123 Main Street".to_string()),
        address_city: Some("Springfield".to_string()),
        address_state: Some("IL".to_string()),
        address_zip: Some("62704".to_string()),
        expiry_date: Some((reference_date + chrono::Duration::days(365 * 4)).to_string()),
        issuing_authority: Some("Illinois Secretary of State".to_string()),
        ..ExtractedIdentityDocument::default()
    }
}

fn employer_document() -> ExtractedEmployerDocument {
    ExtractedEmployerDocument {
        document_kind: Some("pay stub".to_string()),
        employee_name: Some("Jane Doe".to_string()),
        employer_name: Some("Acme Corp.".to_string()),
        health_plan_type: Some("HDHP".to_string()),
        ..ExtractedEmployerDocument::default()
    }
}

fn scenarios(reference_date: NaiveDate) -> Vec<Scenario> {
    let expired = ExtractedIdentityDocument {
        expiry_date: Some((reference_date - chrono::Duration::days(200)).to_string()),
        ..clean_id(reference_date)
    };
    let moved = ExtractedIdentityDocument {
        address_city: Some("Shelbyville".to_string()),
        ..clean_id(reference_date)
    };
    let unreadable = ExtractedIdentityDocument {
        processing_error: true,
        ..clean_id(reference_date)
    };

    vec![
        Scenario {
            title: "Everything agrees",
            id_document: Some(clean_id(reference_date)),
            employer_document: Some(employer_document()),
        },
        Scenario {
            title: "Expired identity document",
            id_document: Some(expired),
            employer_document: Some(employer_document()),
        },
        Scenario {
            title: "Applicant moved since the ID was issued",
            id_document: Some(moved),
            employer_document: Some(employer_document()),
        },
        Scenario {
            title: "Unreadable upload",
            id_document: Some(unreadable),
            employer_document: Some(employer_document()),
        },
        Scenario {
            title: "Employer proof never arrived",
            id_document: Some(clean_id(reference_date)),
            employer_document: None,
        },
    ]
}
