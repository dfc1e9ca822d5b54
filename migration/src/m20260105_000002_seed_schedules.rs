use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or_default();

        // 默认作息：上午 09:00-12:30，下午 14:00-17:30，中间休息点各一个
        let default_schedules = [
            ("saturday_morning", "09:00", "10:45", "12:30"),
            ("saturday_afternoon", "14:00", "15:45", "17:30"),
            ("sunday_morning", "09:00", "10:45", "12:30"),
        ];

        for (time_slot, start_time, middle_time, end_time) in default_schedules {
            let insert = Query::insert()
                .into_table(Schedules::Table)
                .columns([
                    Schedules::TimeSlot,
                    Schedules::StartTime,
                    Schedules::MiddleTime,
                    Schedules::EndTime,
                    Schedules::UpdatedAt,
                ])
                .values_panic([
                    time_slot.into(),
                    start_time.into(),
                    middle_time.into(),
                    end_time.into(),
                    now.into(),
                ])
                .to_owned();

            manager.exec_stmt(insert).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let delete = Query::delete().from_table(Schedules::Table).to_owned();
        manager.exec_stmt(delete).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Schedules {
    #[sea_orm(iden = "schedules")]
    Table,
    TimeSlot,
    StartTime,
    MiddleTime,
    EndTime,
    UpdatedAt,
}
