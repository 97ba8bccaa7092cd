use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, DatabaseConnection, EntityTrait, QueryOrder, Set,
};

use super::db_err;
use crate::domain::{DomainResult, NewReport, Report, ReportRepositoryInterface};
use crate::infrastructure::database::entities::informe;

pub struct SeaOrmReportRepository {
    db: DatabaseConnection,
}

impl SeaOrmReportRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn report_model_to_domain(model: informe::Model) -> Report {
    Report {
        id: model.id,
        title: model.title,
        description: model.description,
        date: model.date,
    }
}

#[async_trait]
impl ReportRepositoryInterface for SeaOrmReportRepository {
    async fn list_reports(&self) -> DomainResult<Vec<Report>> {
        let models = informe::Entity::find()
            .order_by_asc(informe::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(report_model_to_domain).collect())
    }

    async fn create_report(&self, report: NewReport) -> DomainResult<Report> {
        let active = informe::ActiveModel {
            id: NotSet,
            title: Set(report.title),
            description: Set(report.description),
            date: Set(report.date),
        };

        let model = active.insert(&self.db).await.map_err(db_err)?;
        Ok(report_model_to_domain(model))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::test_support::test_db;
    use chrono::NaiveDate;

    fn new_report(title: &str, day: u32) -> NewReport {
        NewReport {
            title: title.to_string(),
            description: "desc".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
        }
    }

    #[tokio::test]
    async fn empty_table_lists_nothing() {
        let db = test_db().await;
        let repo = SeaOrmReportRepository::new(db.connection());
        assert!(repo.list_reports().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn ids_are_generated_in_insertion_order() {
        let db = test_db().await;
        let repo = SeaOrmReportRepository::new(db.connection());

        let first = repo.create_report(new_report("Case 1", 1)).await.unwrap();
        let second = repo.create_report(new_report("Case 2", 2)).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);

        let all = repo.list_reports().await.unwrap();
        assert_eq!(all, vec![first, second]);
    }

    #[tokio::test]
    async fn date_survives_storage() {
        let db = test_db().await;
        let repo = SeaOrmReportRepository::new(db.connection());

        let stored = repo.create_report(new_report("Case", 31)).await.unwrap();
        let listed = repo.list_reports().await.unwrap();
        assert_eq!(listed[0].date, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
        assert_eq!(listed[0], stored);
    }
}
