use async_trait::async_trait;
use uuid::Uuid;
use sqlx::{self, PgPool, Postgres, QueryBuilder};

use crate::{
    entities::{
        company::Company,
        job::{Address, AddressInsert, Job, JobInsert, JobListing, JobListingRow},
        skill::SkillInsert,
    },
    errors::AppError,
    pagination::Pagination,
    repositories::sqlx_repo::SqlxJobRepo,
    search::{contains_pattern, JobPredicate, JobSortField},
};

const JOB_LISTING_SELECT: &str = "SELECT j.*, d.name AS department_name, i.name AS industry_name";
const JOB_COUNT_SELECT: &str = "SELECT COUNT(*)";

// Every search clause may reference any of these aliases.
const JOB_SEARCH_FROM: &str = r#" FROM jobs j
    JOIN departments d ON d.id = j.department_id
    JOIN industries i ON i.id = j.industry_id
    JOIN companies c ON c.id = j.company_id
    LEFT JOIN addresses a ON a.job_id = j.id
    WHERE TRUE"#;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn find_company_by_user(&self, user_id: &Uuid) -> Result<Option<Company>, AppError>;
    async fn industry_exists(&self, id: &Uuid) -> Result<bool, AppError>;
    async fn department_exists(&self, id: &Uuid) -> Result<bool, AppError>;
    /// Writes the job, its skills and its address atomically.
    async fn create_job(
        &self,
        job: &JobInsert,
        address: &AddressInsert,
        skills: &[SkillInsert],
    ) -> Result<(Job, Address), AppError>;
    async fn job_exists(&self, id: &Uuid) -> Result<bool, AppError>;
    /// Removes the job and its children when it belongs to `company_id`.
    /// Returns `None`, leaving every row in place, when it does not.
    async fn delete_job(&self, id: &Uuid, company_id: &Uuid) -> Result<Option<Job>, AppError>;
    async fn get_job_by_id(&self, id: &Uuid) -> Result<Option<Job>, AppError>;
    async fn list_jobs(
        &self,
        predicates: &[JobPredicate],
        pagination: &Pagination,
    ) -> Result<Vec<JobListing>, AppError>;
    async fn count_jobs(&self, predicates: &[JobPredicate]) -> Result<i64, AppError>;
}

impl SqlxJobRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxJobRepo { pool }
    }
}

/// Appends each predicate as an `AND` clause with bound parameters.
fn push_job_predicates(builder: &mut QueryBuilder<'_, Postgres>, predicates: &[JobPredicate]) {
    for predicate in predicates {
        match predicate {
            JobPredicate::TitleOrCompanyContains(text) => {
                let pattern = contains_pattern(text);
                builder
                    .push(" AND (j.title ILIKE ")
                    .push_bind(pattern.clone())
                    .push(" OR c.company_name ILIKE ")
                    .push_bind(pattern)
                    .push(")");
            }
            JobPredicate::LocationContains(text) => {
                let pattern = contains_pattern(text);
                builder
                    .push(" AND (a.address_line ILIKE ")
                    .push_bind(pattern.clone())
                    .push(" OR a.district ILIKE ")
                    .push_bind(pattern)
                    .push(")");
            }
            JobPredicate::IndustryNameContains(text) => {
                builder.push(" AND i.name ILIKE ").push_bind(contains_pattern(text));
            }
            JobPredicate::DepartmentNameContains(text) => {
                builder.push(" AND d.name ILIKE ").push_bind(contains_pattern(text));
            }
            JobPredicate::MinExperience(months) => {
                builder.push(" AND j.experience_in_months >= ").push_bind(*months);
            }
            JobPredicate::MinSalary(salary) => {
                builder.push(" AND j.min_salary >= ").push_bind(*salary);
            }
            JobPredicate::MaxSalary(salary) => {
                builder.push(" AND j.max_salary <= ").push_bind(*salary);
            }
            JobPredicate::Negotiable(negotiable) => {
                builder.push(" AND j.negotiable = ").push_bind(*negotiable);
            }
            JobPredicate::CompanyId(company_id) => {
                builder.push(" AND j.company_id = ").push_bind(*company_id);
            }
        }
    }
}

fn job_listing_query(predicates: &[JobPredicate], pagination: &Pagination) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(JOB_LISTING_SELECT);
    builder.push(JOB_SEARCH_FROM);
    push_job_predicates(&mut builder, predicates);

    let sort = JobSortField::from_param(&pagination.sort_by);
    builder
        .push(" ORDER BY ")
        .push(sort.column())
        .push(" ")
        .push(pagination.sort_order.as_sql())
        .push(", j.id ASC");

    builder.push(" LIMIT ").push_bind(i64::from(pagination.limit));
    builder.push(" OFFSET ").push_bind(pagination.skip as i64);

    builder
}

fn job_count_query(predicates: &[JobPredicate]) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(JOB_COUNT_SELECT);
    builder.push(JOB_SEARCH_FROM);
    push_job_predicates(&mut builder, predicates);
    builder
}

#[async_trait]
impl JobRepository for SqlxJobRepo {
    async fn find_company_by_user(&self, user_id: &Uuid) -> Result<Option<Company>, AppError> {
        let company = sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(company)
    }

    async fn industry_exists(&self, id: &Uuid) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM industries WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    async fn department_exists(&self, id: &Uuid) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM departments WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    async fn create_job(
        &self,
        job: &JobInsert,
        address: &AddressInsert,
        skills: &[SkillInsert],
    ) -> Result<(Job, Address), AppError> {
        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, Job>(
            r#"
            INSERT INTO jobs (
                title, vacancy, deadline, min_salary, max_salary, experience_in_months,
                job_type, min_age, job_description, job_requirements, degree_name,
                degree_title, compensation_benefits, negotiable, industry_id,
                department_id, company_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            RETURNING *
            "#,
        )
        .bind(&job.title)
        .bind(job.vacancy)
        .bind(job.deadline)
        .bind(job.min_salary)
        .bind(job.max_salary)
        .bind(job.experience_in_months)
        .bind(&job.job_type)
        .bind(job.min_age)
        .bind(&job.job_description)
        .bind(&job.job_requirements)
        .bind(&job.degree_name)
        .bind(&job.degree_title)
        .bind(&job.compensation_benefits)
        .bind(job.negotiable)
        .bind(job.industry_id)
        .bind(job.department_id)
        .bind(job.company_id)
        .fetch_one(&mut *tx)
        .await?;

        if !skills.is_empty() {
            let mut builder: QueryBuilder<Postgres> =
                QueryBuilder::new("INSERT INTO job_skills (skill, duration, job_id) ");
            builder.push_values(skills, |mut row, skill| {
                row.push_bind(skill.skill.clone())
                    .push_bind(skill.duration)
                    .push_bind(created.id);
            });
            builder.build().execute(&mut *tx).await?;
        }

        let address = sqlx::query_as::<_, Address>(
            r#"
            INSERT INTO addresses (address_line, district, job_id)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&address.address_line)
        .bind(&address.district)
        .bind(created.id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok((created, address))
    }

    async fn job_exists(&self, id: &Uuid) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM jobs WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    async fn delete_job(&self, id: &Uuid, company_id: &Uuid) -> Result<Option<Job>, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM job_skills WHERE job_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        // A job without an address row is still deletable.
        sqlx::query("DELETE FROM addresses WHERE job_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let deleted = sqlx::query_as::<_, Job>(
            "DELETE FROM jobs WHERE id = $1 AND company_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(company_id)
        .fetch_optional(&mut *tx)
        .await?;

        match deleted {
            Some(job) => {
                tx.commit().await?;
                Ok(Some(job))
            }
            None => {
                tx.rollback().await?;
                Ok(None)
            }
        }
    }

    async fn get_job_by_id(&self, id: &Uuid) -> Result<Option<Job>, AppError> {
        sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn list_jobs(
        &self,
        predicates: &[JobPredicate],
        pagination: &Pagination,
    ) -> Result<Vec<JobListing>, AppError> {
        let mut builder = job_listing_query(predicates, pagination);

        let rows: Vec<JobListingRow> = builder
            .build_query_as::<JobListingRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(JobListing::from).collect())
    }

    async fn count_jobs(&self, predicates: &[JobPredicate]) -> Result<i64, AppError> {
        let mut builder = job_count_query(predicates);

        let count: i64 = builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
