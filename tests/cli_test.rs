mod common;

use anyhow::Result;
use budget_tracker::cli::Cli;
use budget_tracker::domain::EntryKind;
use clap::Parser;
use common::{db_path, open_service};
use tempfile::TempDir;

/// Run one CLI invocation against the temp dir's database
async fn run_cli(temp: &TempDir, args: &[&str]) -> Result<()> {
    let path = db_path(temp);
    let mut argv = vec!["budget-tracker", "-d", path.to_str().unwrap()];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv)?.run().await
}

#[tokio::test]
async fn test_init_creates_empty_budget() -> Result<()> {
    let temp = TempDir::new()?;
    run_cli(&temp, &["init"]).await?;

    assert!(db_path(&temp).exists());
    assert!(open_service(&temp).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_add_records_entry() -> Result<()> {
    let temp = TempDir::new()?;
    run_cli(&temp, &["add", "1000", "-c", "Salary", "-t", "income", "-n", "October"]).await?;
    run_cli(&temp, &["add", "300", "-c", "Rent"]).await?;

    let service = open_service(&temp).await?;
    assert_eq!(service.len(), 2);

    let rent = &service.entries()[0];
    assert_eq!(rent.kind, EntryKind::Expense);
    assert_eq!(rent.amount_cents, 30000);

    let salary = &service.entries()[1];
    assert_eq!(salary.kind, EntryKind::Income);
    assert_eq!(salary.note.as_deref(), Some("October"));
    assert_eq!(service.compute_totals().balance_cents, 70000);

    Ok(())
}

#[tokio::test]
async fn test_rejected_add_reports_reason_and_changes_nothing() -> Result<()> {
    let temp = TempDir::new()?;

    let cases: [(&[&str], &str); 4] = [
        (&["add", "0", "-c", "Rent"], "greater than zero"),
        (&["add", "-5", "-c", "Rent"], "greater than zero"),
        (&["add", "ten", "-c", "Rent"], "not a valid number"),
        (&["add", "50"], "category is required"),
    ];

    for (args, reason) in cases {
        let err = run_cli(&temp, args).await.unwrap_err().to_string();
        assert!(err.starts_with("Please fill amount & category: "), "{}", err);
        assert!(err.contains(reason), "{}", err);
    }

    assert!(open_service(&temp).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_add_with_unknown_type_fails() -> Result<()> {
    let temp = TempDir::new()?;

    let err = run_cli(&temp, &["add", "10", "-c", "Gift", "-t", "refund"])
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Invalid entry type"));
    assert!(open_service(&temp).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_delete_by_id() -> Result<()> {
    let temp = TempDir::new()?;
    run_cli(&temp, &["add", "12", "-c", "Lunch"]).await?;
    run_cli(&temp, &["add", "8", "-c", "Coffee"]).await?;

    let lunch_id = open_service(&temp).await?.entries()[1].id.to_string();
    run_cli(&temp, &["delete", &lunch_id]).await?;

    let service = open_service(&temp).await?;
    assert_eq!(service.len(), 1);
    assert_eq!(service.entries()[0].category, "Coffee");

    Ok(())
}

#[tokio::test]
async fn test_delete_unknown_id_succeeds() -> Result<()> {
    let temp = TempDir::new()?;
    run_cli(&temp, &["add", "12", "-c", "Lunch"]).await?;

    run_cli(&temp, &["delete", "does-not-exist"]).await?;

    assert_eq!(open_service(&temp).await?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_list_and_summary_succeed() -> Result<()> {
    let temp = TempDir::new()?;
    run_cli(&temp, &["list"]).await?;
    run_cli(&temp, &["summary"]).await?;

    run_cli(&temp, &["add", "1000", "-c", "Salary", "-t", "income"]).await?;
    run_cli(&temp, &["add", "300", "-c", "Rent"]).await?;

    run_cli(&temp, &["list", "-t", "expense", "-l", "1"]).await?;
    run_cli(&temp, &["--currency", "$", "summary"]).await?;

    let err = run_cli(&temp, &["list", "-t", "loan"]).await.unwrap_err();
    assert!(err.to_string().contains("Invalid entry type"));

    Ok(())
}
