use lifeaudit_core::{
    validate_date, AuditProfile, DomainRegistry, EntryDraft, EntryField, EntryValidationError,
    EntryValidator,
};

fn strict_draft() -> EntryDraft {
    EntryDraft {
        domain: "Finances".to_string(),
        responsibility: "Review budget".to_string(),
        status: "Needs Attention".to_string(),
        priority: "Medium".to_string(),
        actions: "Export statements".to_string(),
        notes: "Q1 only".to_string(),
        assigned_date: "2024-01-01".to_string(),
        due_date: "2024-01-08".to_string(),
        completed_date: "2024-01-05".to_string(),
    }
}

#[test]
fn strict_profile_accepts_complete_draft() {
    let validator = EntryValidator::new(AuditProfile::strict());
    let mut registry = DomainRegistry::default();

    let entry = validator.validate(&strict_draft(), &mut registry).unwrap();
    assert_eq!(
        entry.values(),
        [
            "Finances",
            "Review budget",
            "Needs Attention",
            "Medium",
            "Export statements",
            "Q1 only",
            "2024-01-01",
            "2024-01-08",
            "2024-01-05",
        ]
    );
}

#[test]
fn blank_domain_or_responsibility_is_missing_in_every_profile() {
    for profile in [AuditProfile::strict(), AuditProfile::persisted()] {
        let validator = EntryValidator::new(profile);

        let mut draft = strict_draft();
        draft.status.clear();
        draft.domain = "   ".to_string();
        let err = validator.check(&draft).unwrap_err();
        assert_eq!(err, EntryValidationError::MissingField(EntryField::Domain));

        let mut draft = strict_draft();
        draft.status.clear();
        draft.responsibility = "\t".to_string();
        let err = validator.check(&draft).unwrap_err();
        assert_eq!(
            err,
            EntryValidationError::MissingField(EntryField::Responsibility)
        );
    }
}

#[test]
fn strict_profile_requires_every_date() {
    let validator = EntryValidator::new(AuditProfile::strict());
    let mut draft = strict_draft();
    draft.completed_date.clear();

    let err = validator.check(&draft).unwrap_err();
    assert_eq!(
        err,
        EntryValidationError::MissingField(EntryField::CompletedDate)
    );
}

#[test]
fn malformed_dates_are_format_errors() {
    for value in ["2023-1-5", "23-01-05", "2023/01/05", "2023-01-05T00:00", "20230105", "abcd-ef-gh"] {
        let err = validate_date(EntryField::AssignedDate, value).unwrap_err();
        assert_eq!(
            err,
            EntryValidationError::InvalidDateFormat {
                field: EntryField::AssignedDate,
                value: value.to_string(),
            },
            "value {value:?}"
        );
    }
}

#[test]
fn impossible_dates_are_calendar_errors() {
    for value in ["2023-02-30", "2023-02-29", "2024-04-31", "2024-00-10", "2024-01-00"] {
        let err = validate_date(EntryField::DueDate, value).unwrap_err();
        assert!(
            matches!(err, EntryValidationError::InvalidCalendarDate { .. }),
            "value {value:?} gave {err:?}"
        );
    }
    assert!(validate_date(EntryField::DueDate, "2023-02-28").is_ok());
}

#[test]
fn date_errors_name_the_offending_field() {
    let validator = EntryValidator::new(AuditProfile::persisted());
    let draft = EntryDraft {
        domain: "Health".to_string(),
        responsibility: "Dentist".to_string(),
        due_date: "2024-02-30".to_string(),
        ..EntryDraft::default()
    };

    let err = validator.check(&draft).unwrap_err();
    assert_eq!(err.field(), EntryField::DueDate);
    assert!(err.to_string().contains("Due Date"));
}

#[test]
fn novel_domain_is_appended_exactly_once() {
    let validator = EntryValidator::new(AuditProfile::persisted());
    let mut registry = DomainRegistry::default();
    let before = registry.known().to_vec();

    let draft = EntryDraft {
        domain: "Garden".to_string(),
        responsibility: "Plant tomatoes".to_string(),
        ..EntryDraft::default()
    };
    validator.validate(&draft, &mut registry).unwrap();
    validator.validate(&draft, &mut registry).unwrap();

    let known = registry.known();
    assert_eq!(&known[..before.len()], before.as_slice());
    assert_eq!(known.iter().filter(|domain| *domain == "Garden").count(), 1);
    assert_eq!(known.last().map(String::as_str), Some("Garden"));
}
