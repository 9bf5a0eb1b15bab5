use std::sync::Arc;

use uuid::Uuid;

use crate::{
    entities::{
        company::Company,
        job::{parse_deadline, CreateJobRequest, CreatedJobResponse, Job, JobCountResponse, JobListing},
    },
    errors::AppError,
    pagination::{calculate_pagination, PaginationOptions},
    repositories::job::JobRepository,
    search::{JobFilters, JobPredicate},
    utils::valid_uuid::valid_uuid,
};

pub struct JobHandler<R>
where
    R: JobRepository + ?Sized,
{
    pub job_repo: Arc<R>,
}

impl<R> JobHandler<R>
where
    R: JobRepository + ?Sized,
{
    pub fn new(job_repo: Arc<R>) -> Self {
        JobHandler { job_repo }
    }

    async fn company_for(&self, user_id: &Uuid) -> Result<Company, AppError> {
        self.job_repo
            .find_company_by_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Company not found".to_string()))
    }

    /// Posts a job for the employer's company.
    ///
    /// Company, industry and department are checked in that order before
    /// anything is written.
    pub async fn create_job(
        &self,
        request: CreateJobRequest,
        user_id: &Uuid,
    ) -> Result<CreatedJobResponse, AppError> {
        let deadline = parse_deadline(&request.deadline)?;

        let company = self.company_for(user_id).await?;

        if !self.job_repo.industry_exists(&request.industry_id).await? {
            return Err(AppError::NotFound("Industry not found".to_string()));
        }
        if !self.job_repo.department_exists(&request.department_id).await? {
            return Err(AppError::NotFound("Department not found".to_string()));
        }

        let (job, address, skills) = request.into_inserts(company.id, deadline);
        let (job, address) = self.job_repo.create_job(&job, &address, &skills).await?;

        tracing::info!(job_id = %job.id, company_id = %company.id, skills = skills.len(), "Job created");
        Ok(CreatedJobResponse { job, address })
    }

    /// Deletes a job owned by the employer's company, along with its skills and address.
    pub async fn delete_job(&self, job_id: &str, user_id: &Uuid) -> Result<Job, AppError> {
        let job_id = valid_uuid(job_id)?;

        let company = self.company_for(user_id).await?;

        if !self.job_repo.job_exists(&job_id).await? {
            return Err(AppError::InvalidRequest("Job not found".to_string()));
        }

        match self.job_repo.delete_job(&job_id, &company.id).await? {
            Some(job) => {
                tracing::info!(job_id = %job.id, company_id = %company.id, "Job deleted");
                Ok(job)
            }
            None => {
                tracing::warn!(job_id = %job_id, company_id = %company.id, "Refused to delete another company's job");
                Err(AppError::ForbiddenAccess)
            }
        }
    }

    pub async fn get_single_job(&self, job_id: &str) -> Result<Job, AppError> {
        let job_id = valid_uuid(job_id)?;

        self.job_repo
            .get_job_by_id(&job_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Job not found".to_string()))
    }

    pub async fn get_all_jobs(
        &self,
        filters: &JobFilters,
        options: &PaginationOptions,
    ) -> Result<Vec<JobListing>, AppError> {
        let pagination = calculate_pagination(options);
        self.job_repo.list_jobs(&filters.predicates(), &pagination).await
    }

    /// Number of jobs matching the same filters `get_all_jobs` accepts.
    pub async fn get_jobs_count(&self, filters: &JobFilters) -> Result<JobCountResponse, AppError> {
        let count = self.job_repo.count_jobs(&filters.predicates()).await?;
        Ok(JobCountResponse { count })
    }

    pub async fn get_my_posted_jobs(
        &self,
        user_id: &Uuid,
        options: &PaginationOptions,
    ) -> Result<Vec<JobListing>, AppError> {
        let company = self.company_for(user_id).await?;
        let pagination = calculate_pagination(options);

        self.job_repo
            .list_jobs(&[JobPredicate::CompanyId(company.id)], &pagination)
            .await
    }
}
