use lifeaudit_core::{
    AuditConfig, AuditError, AuditProfile, AuditService, EntryDraft, EntryField,
    EntryRepository, EntryValidationError, JsonEntryRepository, MemoryEntryRepository,
    RepoError,
};

fn run_5k() -> EntryDraft {
    EntryDraft {
        domain: "Health".to_string(),
        responsibility: "Run 5k".to_string(),
        status: "Done".to_string(),
        priority: "Low".to_string(),
        assigned_date: "2024-01-01".to_string(),
        due_date: "2024-01-07".to_string(),
        completed_date: "2024-01-05".to_string(),
        ..EntryDraft::default()
    }
}

fn file_service(path: &std::path::Path) -> AuditService<JsonEntryRepository> {
    AuditService::new(
        JsonEntryRepository::create(path).unwrap(),
        AuditConfig::with_profile(AuditProfile::persisted()),
    )
}

#[test]
fn run_5k_scenario_exports_header_plus_one_row() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = file_service(&dir.path().join("audit.json"));

    let record = service.add_entry(&run_5k()).unwrap();
    assert_eq!(service.entries().len(), 1);
    assert_eq!(service.entries()[0], record);

    let export_path = dir.path().join("audit.csv");
    assert_eq!(service.export(&export_path).unwrap(), 1);
    assert_eq!(
        std::fs::read_to_string(&export_path).unwrap(),
        "Domain,Responsibility,Status,Priority,Actions,Notes,Assigned Date,Due Date,Completed Date\r\n\
         Health,Run 5k,Done,Low,,,2024-01-01,2024-01-07,2024-01-05\r\n"
    );
}

#[test]
fn missing_required_field_leaves_store_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = file_service(&dir.path().join("audit.json"));
    service.add_entry(&run_5k()).unwrap();

    for field in [EntryField::Domain, EntryField::Responsibility] {
        let draft = run_5k().with(field, "");
        let err = service.add_entry(&draft).unwrap_err();
        assert!(matches!(
            err,
            AuditError::Validation(EntryValidationError::MissingField(missing)) if missing == field
        ));
        assert_eq!(service.entries().len(), 1);
    }
}

#[test]
fn rejected_entry_does_not_register_domain() {
    let mut service = AuditService::new(
        MemoryEntryRepository::new(),
        AuditConfig::with_profile(AuditProfile::persisted()),
    );
    let before = service.known_domains().to_vec();

    let draft = run_5k()
        .with(EntryField::Domain, "Garden")
        .with(EntryField::DueDate, "2024-1-7");
    let err = service.add_entry(&draft).unwrap_err();
    assert!(matches!(
        err,
        AuditError::Validation(EntryValidationError::InvalidDateFormat { .. })
    ));
    assert_eq!(service.known_domains(), before.as_slice());

    service
        .add_entry(&draft.with(EntryField::DueDate, "2024-01-07"))
        .unwrap();
    assert_eq!(service.known_domains().last().map(String::as_str), Some("Garden"));
    assert_eq!(service.known_domains().len(), before.len() + 1);
}

#[test]
fn delete_is_idempotent_through_service() {
    let mut service = AuditService::new(
        MemoryEntryRepository::new(),
        AuditConfig::with_profile(AuditProfile::persisted()),
    );
    let keep = service.add_entry(&run_5k()).unwrap();
    let drop_me = service.add_entry(&run_5k()).unwrap();

    assert!(service.delete_entry(drop_me.id).unwrap());
    let after_once = service.entries();
    assert!(!service.delete_entry(drop_me.id).unwrap());
    assert_eq!(service.entries(), after_once);
    assert_eq!(after_once, vec![keep]);
}

#[test]
fn delete_entries_counts_only_existing_ids() {
    let mut service = AuditService::new(
        MemoryEntryRepository::new(),
        AuditConfig::with_profile(AuditProfile::persisted()),
    );
    let first = service.add_entry(&run_5k()).unwrap();
    let second = service.add_entry(&run_5k()).unwrap();

    let removed = service
        .delete_entries(&[first.id, 99, second.id, first.id])
        .unwrap();
    assert_eq!(removed, 2);
    assert!(service.repository().is_empty());
}

#[test]
fn new_store_then_reload_keeps_original_records() {
    let dir = tempfile::tempdir().unwrap();
    let original = dir.path().join("original.json");
    let scratch = dir.path().join("scratch.json");
    let mut service = file_service(&original);
    service.add_entry(&run_5k()).unwrap();
    let snapshot = service.entries();

    service.new_store(&scratch).unwrap();
    assert!(service.entries().is_empty());
    assert_eq!(service.store_path(), scratch.as_path());

    assert_eq!(service.load_store(&original).unwrap(), 1);
    assert_eq!(service.entries(), snapshot);
}

#[test]
fn loading_store_resets_domains_to_seeds_plus_store() {
    let dir = tempfile::tempdir().unwrap();
    let other = dir.path().join("other.json");
    {
        let mut seeded = file_service(&other);
        seeded
            .add_entry(&run_5k().with(EntryField::Domain, "Music"))
            .unwrap();
    }

    let mut service = file_service(&dir.path().join("audit.json"));
    let seeds = service.known_domains().to_vec();
    service
        .add_entry(&run_5k().with(EntryField::Domain, "Garden"))
        .unwrap();
    assert!(!service.known_domains().iter().any(|domain| domain == "Music"));

    service.load_store(&other).unwrap();
    let mut expected = seeds.clone();
    expected.push("Music".to_string());
    assert_eq!(service.known_domains(), expected.as_slice());

    service.new_store(dir.path().join("fresh.json")).unwrap();
    assert_eq!(service.known_domains(), seeds.as_slice());
}

#[test]
fn failed_batch_delete_removes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = file_service(&dir.path().join("audit.json"));
    for _ in 0..3 {
        service.add_entry(&run_5k()).unwrap();
    }
    drop(dir);

    let err = service.delete_entries(&[1, 2]).unwrap_err();
    assert!(matches!(err, AuditError::Store(RepoError::Io { .. })));
    assert_eq!(service.entries().len(), 3);
}

#[test]
fn failed_store_write_does_not_register_domain() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = file_service(&dir.path().join("audit.json"));
    let before = service.known_domains().to_vec();
    drop(dir);

    let err = service
        .add_entry(&run_5k().with(EntryField::Domain, "Garden"))
        .unwrap_err();
    assert!(matches!(err, AuditError::Store(RepoError::Io { .. })));
    assert_eq!(service.known_domains(), before.as_slice());
    assert!(service.entries().is_empty());
}

#[test]
fn failed_load_keeps_current_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("audit.json");
    let mut service = file_service(&path);
    service.add_entry(&run_5k()).unwrap();

    let err = service
        .load_store(dir.path().join("nope.json"))
        .unwrap_err();
    assert!(matches!(err, AuditError::Store(RepoError::Io { .. })));
    assert_eq!(service.store_path(), path.as_path());
    assert_eq!(service.entries().len(), 1);
}

#[test]
fn blank_draft_mirrors_form_defaults() {
    let service = AuditService::new(
        MemoryEntryRepository::new(),
        AuditConfig::with_profile(AuditProfile::strict()),
    );
    let draft = service.blank_draft();

    assert_eq!(draft.domain, "Finances");
    assert_eq!(draft.status, "On Track");
    assert_eq!(draft.priority, "High");
    assert_eq!(draft.assigned_date.len(), 10);
    assert!(draft.due_date.is_empty());
}

#[test]
fn strict_profile_rejects_persisted_statuses() {
    let mut service = AuditService::new(
        MemoryEntryRepository::new(),
        AuditConfig::with_profile(AuditProfile::strict()),
    );
    let draft = run_5k()
        .with(EntryField::Actions, "jog")
        .with(EntryField::Notes, "easy pace");

    let err = service.add_entry(&draft).unwrap_err();
    assert!(matches!(
        err,
        AuditError::Validation(EntryValidationError::InvalidChoice { field: EntryField::Status, .. })
    ));

    service
        .add_entry(&draft.with(EntryField::Status, "On Track"))
        .unwrap();
    assert_eq!(service.entries().len(), 1);
}
