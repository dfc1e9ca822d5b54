use super::SeaOrmStorage;
use crate::entity::course_session_students::{
    Column as EnrollmentColumn, Entity as CourseSessionStudents,
};
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{EdurootsError, Result};
use crate::models::{
    PaginationInfo,
    users::{
        entities::{User, UserRole, UserStatus},
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建用户
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            email: Set(req.email),
            password_hash: Set(req.password),
            role: Set(req.role.to_string()),
            status: Set(UserStatus::Active.to_string()),
            firstname: Set(req.firstname),
            lastname: Set(req.lastname),
            phone: Set(req.phone),
            gender: Set(req.gender.map(|g| g.to_string())),
            date_of_birth: Set(req.date_of_birth.map(crate::entity::format_date)),
            parent_email: Set(req.parent_email),
            school_year: Set(req.school_year),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("创建用户失败: {e}")))?;

        Ok(result.into_user())
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过邮箱获取用户
    pub async fn get_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 批量获取用户
    pub async fn get_users_by_ids_impl(&self, ids: Vec<i64>) -> Result<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = Users::find()
            .filter(Column::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("批量查询用户失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_user()).collect())
    }

    /// 分页列出用户
    pub async fn list_users_with_pagination_impl(
        &self,
        query: UserListQuery,
    ) -> Result<UserListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(20).clamp(1, 100) as u64;

        let mut select = Users::find();

        // 搜索条件
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Firstname.contains(&escaped))
                    .add(Column::Lastname.contains(&escaped))
                    .add(Column::Email.contains(&escaped)),
            );
        }

        // 角色筛选
        if let Some(ref role) = query.role {
            select = select.filter(Column::Role.eq(role.to_string()));
        }

        // 学年筛选
        if let Some(ref school_year) = query.school_year {
            select = select.filter(Column::SchoolYear.eq(school_year.as_str()));
        }

        if !query.include_inactive {
            select = select.filter(Column::IsActive.eq(true));
        }

        if let Some(ids) = query.restrict_to_ids {
            select = select.filter(Column::Id.is_in(ids));
        }

        // 排序
        select = select
            .order_by_asc(Column::Lastname)
            .order_by_asc(Column::Firstname)
            .order_by_asc(Column::Id);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| EdurootsError::database_operation(format!("查询用户总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| EdurootsError::database_operation(format!("查询用户页数失败: {e}")))?;

        let users = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("查询用户列表失败: {e}")))?;

        Ok(UserListResponse {
            items: users.into_iter().map(|m| m.into_user()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 列出某角色的全部活跃用户
    pub async fn list_active_users_by_role_impl(&self, role: UserRole) -> Result<Vec<User>> {
        let result = Users::find()
            .filter(Column::Role.eq(role.to_string()))
            .filter(Column::IsActive.eq(true))
            .order_by_asc(Column::Lastname)
            .order_by_asc(Column::Firstname)
            .all(&self.db)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("查询用户列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_user()).collect())
    }

    /// 更新用户最后登录时间
    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Users::update_many()
            .col_expr(Column::LastLogin, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("更新最后登录时间失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 更新用户信息
    pub async fn update_user_impl(
        &self,
        id: i64,
        update: UpdateUserRequest,
    ) -> Result<Option<User>> {
        // 先检查用户是否存在
        let existing = self.get_user_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(email) = update.email {
            model.email = Set(email);
        }
        if let Some(password) = update.password {
            model.password_hash = Set(password);
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }
        if let Some(firstname) = update.firstname {
            model.firstname = Set(firstname);
        }
        if let Some(lastname) = update.lastname {
            model.lastname = Set(lastname);
        }
        if let Some(phone) = update.phone {
            model.phone = Set(Some(phone));
        }
        if let Some(gender) = update.gender {
            model.gender = Set(Some(gender.to_string()));
        }
        if let Some(date_of_birth) = update.date_of_birth {
            model.date_of_birth = Set(Some(crate::entity::format_date(date_of_birth)));
        }
        if let Some(parent_email) = update.parent_email {
            model.parent_email = Set(Some(parent_email));
        }
        if let Some(school_year) = update.school_year {
            model.school_year = Set(Some(school_year));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("更新用户失败: {e}")))?;

        self.get_user_by_id_impl(id).await
    }

    /// 软删除用户，学生同时退出所有课节
    pub async fn soft_delete_user_impl(&self, id: i64) -> Result<bool> {
        let Some(existing) = self.get_user_by_id_impl(id).await? else {
            return Ok(false);
        };
        if !existing.is_active {
            return Ok(false);
        }

        let now = chrono::Utc::now().timestamp();
        let txn = self.db.begin().await?;

        let model = ActiveModel {
            id: Set(id),
            is_active: Set(false),
            status: Set(UserStatus::Inactive.to_string()),
            deleted_at: Set(Some(now)),
            updated_at: Set(now),
            ..Default::default()
        };
        model
            .update(&txn)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("删除用户失败: {e}")))?;

        if existing.role == UserRole::Student {
            CourseSessionStudents::delete_many()
                .filter(EnrollmentColumn::StudentId.eq(id))
                .exec(&txn)
                .await
                .map_err(|e| EdurootsError::database_operation(format!("移除选课记录失败: {e}")))?;
        }

        txn.commit().await?;
        Ok(true)
    }

    /// 统计用户数量
    pub async fn count_users_impl(&self) -> Result<u64> {
        let count = Users::find()
            .count(&self.db)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("统计用户数量失败: {e}")))?;

        Ok(count)
    }

    /// 统计某角色的活跃用户数量
    pub async fn count_active_users_by_role_impl(&self, role: UserRole) -> Result<i64> {
        let count = Users::find()
            .filter(Column::Role.eq(role.to_string()))
            .filter(Column::IsActive.eq(true))
            .count(&self.db)
            .await
            .map_err(|e| EdurootsError::database_operation(format!("统计用户数量失败: {e}")))?;

        Ok(count as i64)
    }
}
