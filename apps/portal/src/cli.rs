use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};

use crate::api::ApiClient;
use crate::config::Config;
use crate::forms::review::NO_ELIGIBLE_MESSAGE;
use crate::forms::{
    CompanyField, CompanyForm, EmployeeField, EmployeeForm, JobField, JobForm, ReviewForm,
    ReviewFormView,
};
use crate::job_list::{DeleteOutcome, JobList, JobListView, DELETE_CONFIRM_PROMPT};
use crate::models::{Employee, Job, Rating, Review};
use crate::notify::{ConsoleNotifier, Notifier};

#[derive(Parser)]
#[command(name = "job-portal", version, about = "Job portal client")]
pub struct Cli {
    /// API base URL; overrides JOB_PORTAL_API_URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    #[command(subcommand)]
    Jobs(JobsCommand),
    #[command(subcommand)]
    Companies(CompaniesCommand),
    #[command(subcommand)]
    Employees(EmployeesCommand),
    #[command(subcommand)]
    Reviews(ReviewsCommand),
}

#[derive(Subcommand)]
pub enum JobsCommand {
    List,
    Show { id: i64 },
    Create(NewJobArgs),
    Update(UpdateJobArgs),
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args)]
pub struct NewJobArgs {
    #[arg(long, default_value = "")]
    pub title: String,
    #[arg(long, default_value = "")]
    pub description: String,
    #[arg(long, default_value = "")]
    pub location: String,
    #[arg(long, default_value = "")]
    pub min_salary: String,
    #[arg(long, default_value = "")]
    pub max_salary: String,
    #[arg(long, default_value = "")]
    pub company_id: String,
}

#[derive(Args)]
pub struct UpdateJobArgs {
    pub id: i64,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long, value_parser = finite_amount)]
    pub min_salary: Option<f64>,
    #[arg(long, value_parser = finite_amount)]
    pub max_salary: Option<f64>,
}

#[derive(Subcommand)]
pub enum CompaniesCommand {
    Create {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
}

#[derive(Subcommand)]
pub enum EmployeesCommand {
    List,
    Show { id: i64 },
    Create {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        skills: String,
        #[arg(long, default_value = "")]
        job_id: String,
    },
    /// Jobs held by an employee
    Jobs { id: i64 },
}

#[derive(Subcommand)]
pub enum ReviewsCommand {
    List {
        #[arg(long)]
        job: Option<i64>,
    },
    /// Employees who may still review a job
    Eligible { job_id: i64 },
    Submit {
        job_id: i64,
        #[arg(long)]
        employee: i64,
        #[arg(long, default_value_t = 5)]
        rating: u8,
        #[arg(long, default_value = "")]
        text: String,
    },
}

pub async fn run(cli: Cli, config: &Config) -> Result<()> {
    let api = ApiClient::from_config(config).context("Failed to create API client")?;
    let notifier: Arc<dyn Notifier> = Arc::new(ConsoleNotifier);

    match cli.command {
        Command::Jobs(cmd) => run_jobs(cmd, api, notifier).await,
        Command::Companies(cmd) => run_companies(cmd, api, notifier).await,
        Command::Employees(cmd) => run_employees(cmd, api, notifier).await,
        Command::Reviews(cmd) => run_reviews(cmd, api, notifier).await,
    }
}

async fn run_jobs(cmd: JobsCommand, api: ApiClient, notifier: Arc<dyn Notifier>) -> Result<()> {
    match cmd {
        JobsCommand::List => {
            let mut list = JobList::new(api, notifier);
            list.load().await;
            match list.view() {
                JobListView::Loading => {}
                JobListView::Error(message) => bail!("{message}"),
                JobListView::Empty => {
                    println!("No Jobs Available");
                    println!("Please add jobs to see them listed here.");
                }
                JobListView::Populated(jobs) => print!("{}", render_jobs(jobs)),
            }
        }
        JobsCommand::Show { id } => {
            let job = api.get_job(id).await?;
            print!("{}", render_jobs(std::slice::from_ref(&job)));
            if let Some(requirements) = &job.requirements {
                println!("Requirements: {requirements}");
            }
        }
        JobsCommand::Create(args) => {
            let mut form = JobForm::new(api, notifier);
            form.set(JobField::Title, args.title);
            form.set(JobField::Description, args.description);
            form.set(JobField::Location, args.location);
            form.set(JobField::MinSalary, args.min_salary);
            form.set(JobField::MaxSalary, args.max_salary);
            form.set(JobField::CompanyId, args.company_id);
            if let Some(job) = form.submit().await? {
                println!("Created job {}", job.id);
            }
        }
        JobsCommand::Update(args) => {
            let mut list = JobList::new(api, notifier);
            list.load().await;
            if let JobListView::Error(message) = list.view() {
                bail!("{message}");
            }
            let Some(draft) = list.begin_edit(args.id) else {
                bail!("Job {} is not listed", args.id);
            };
            if let Some(title) = args.title {
                draft.title = title;
            }
            if let Some(description) = args.description {
                draft.description = description;
            }
            if let Some(location) = args.location {
                draft.location = location;
            }
            if let Some(min_salary) = args.min_salary {
                draft.min_salary = Some(min_salary);
            }
            if let Some(max_salary) = args.max_salary {
                draft.max_salary = Some(max_salary);
            }
            list.save_edit().await?;
            if let Some(job) = list.find(args.id) {
                print!("{}", render_jobs(std::slice::from_ref(job)));
            }
        }
        JobsCommand::Delete { id, yes } => {
            let mut list = JobList::new(api, notifier);
            list.load().await;
            if let JobListView::Error(message) = list.view() {
                bail!("{message}");
            }
            match list.delete(id, |job| yes || confirm(job)).await? {
                DeleteOutcome::Deleted => println!("Deleted job {id}"),
                DeleteOutcome::Declined => println!("Cancelled"),
                DeleteOutcome::NotListed => bail!("Job {id} is not listed"),
            }
        }
    }
    Ok(())
}

async fn run_companies(
    cmd: CompaniesCommand,
    api: ApiClient,
    notifier: Arc<dyn Notifier>,
) -> Result<()> {
    match cmd {
        CompaniesCommand::Create { name, description } => {
            let mut form = CompanyForm::new(api, notifier);
            form.set(CompanyField::Name, name);
            form.set(CompanyField::Description, description);
            match form.submit().await? {
                Some(company) => println!("Registered company {} ({})", company.id, company.name),
                None => println!("Registered company"),
            }
        }
    }
    Ok(())
}

async fn run_employees(
    cmd: EmployeesCommand,
    api: ApiClient,
    notifier: Arc<dyn Notifier>,
) -> Result<()> {
    match cmd {
        EmployeesCommand::List => print!("{}", render_employees(&api.list_employees().await?)),
        EmployeesCommand::Show { id } => {
            let employee = api.get_employee(id).await?;
            print!("{}", render_employees(std::slice::from_ref(&employee)));
        }
        EmployeesCommand::Create {
            name,
            email,
            skills,
            job_id,
        } => {
            let mut form = EmployeeForm::new(api, notifier);
            form.set(EmployeeField::Name, name);
            form.set(EmployeeField::Email, email);
            form.set(EmployeeField::Skills, skills);
            form.set(EmployeeField::JobId, job_id);
            match form.submit().await? {
                Some(employee) => println!("Added employee {}", employee.id),
                None => println!("Added employee"),
            }
        }
        EmployeesCommand::Jobs { id } => print!("{}", render_jobs(&api.jobs_for_employee(id).await?)),
    }
    Ok(())
}

async fn run_reviews(
    cmd: ReviewsCommand,
    api: ApiClient,
    notifier: Arc<dyn Notifier>,
) -> Result<()> {
    match cmd {
        ReviewsCommand::List { job } => {
            let reviews = match job {
                Some(job_id) => api.reviews_for_job(job_id).await?,
                None => api.list_reviews().await?,
            };
            print!("{}", render_reviews(&reviews));
        }
        ReviewsCommand::Eligible { job_id } => {
            let mut form = ReviewForm::new(api, notifier, job_id, |_| {});
            form.load().await;
            match form.view() {
                ReviewFormView::Loading => {}
                ReviewFormView::Failed(err) => bail!("{}", err.message),
                ReviewFormView::NoEligible => println!("{NO_ELIGIBLE_MESSAGE}"),
                ReviewFormView::Ready(employees) => print!("{}", render_employees(employees)),
            }
        }
        ReviewsCommand::Submit {
            job_id,
            employee,
            rating,
            text,
        } => {
            let rating = Rating::new(rating)?;
            let mut form = ReviewForm::new(api, notifier, job_id, |review| {
                print!("{}", render_reviews(std::slice::from_ref(&review)));
            });
            form.load().await;
            match form.view() {
                ReviewFormView::Failed(err) => bail!("{}", err.message),
                ReviewFormView::NoEligible => bail!("{NO_ELIGIBLE_MESSAGE}"),
                _ => {}
            }
            form.select_employee(employee)?;
            form.set_rating(rating);
            form.set_text(text);
            form.submit().await?;
        }
    }
    Ok(())
}

fn finite_amount(raw: &str) -> Result<f64, String> {
    match raw.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() => Ok(amount),
        _ => Err(format!("'{raw}' is not an amount")),
    }
}

fn confirm(job: &Job) -> bool {
    print!("{DELETE_CONFIRM_PROMPT} [{}] (y/N) ", job.title);
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim(), "y" | "Y" | "yes"),
        Err(_) => false,
    }
}

pub fn render_jobs(jobs: &[Job]) -> String {
    let mut out = format!(
        "{:<6} {:<28} {:<18} {:<28} {}\n",
        "ID", "Title", "Location", "Salary", "Description"
    );
    for job in jobs {
        out.push_str(&format!(
            "{:<6} {:<28} {:<18} {:<28} {}\n",
            job.id,
            job.title,
            job.location,
            job.salary_range(),
            job.description
        ));
    }
    out
}

pub fn render_employees(employees: &[Employee]) -> String {
    let mut out = format!(
        "{:<6} {:<24} {:<30} {:<8} {}\n",
        "ID", "Name", "Email", "Job", "Skills"
    );
    for employee in employees {
        let job = employee
            .job_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "{:<6} {:<24} {:<30} {:<8} {}\n",
            employee.id, employee.name, employee.email, job, employee.skills
        ));
    }
    out
}

pub fn render_reviews(reviews: &[Review]) -> String {
    let mut out = String::new();
    for review in reviews {
        let author = review
            .employee_name
            .clone()
            .unwrap_or_else(|| format!("employee {}", review.employee_id));
        out.push_str(&format!(
            "#{} job {} {} by {}: {}\n",
            review.id,
            review.job_id,
            review.rating.stars(),
            author,
            review.text
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_review_submission() {
        let cli = Cli::try_parse_from([
            "job-portal",
            "--base-url",
            "http://api.test/api",
            "reviews",
            "submit",
            "5",
            "--employee",
            "1",
            "--rating",
            "3",
            "--text",
            "Great job",
        ])
        .unwrap();
        assert_eq!(cli.base_url.as_deref(), Some("http://api.test/api"));
        match cli.command {
            Command::Reviews(ReviewsCommand::Submit {
                job_id,
                employee,
                rating,
                text,
            }) => {
                assert_eq!((job_id, employee, rating), (5, 1, 3));
                assert_eq!(text, "Great job");
            }
            _ => panic!("wrong command"),
        }
    }

    #[test]
    fn test_cli_create_job_defaults_to_blank_fields() {
        let cli = Cli::try_parse_from(["job-portal", "jobs", "create", "--title", "QA"]).unwrap();
        match cli.command {
            Command::Jobs(JobsCommand::Create(args)) => {
                assert_eq!(args.title, "QA");
                assert_eq!(args.company_id, "");
            }
            _ => panic!("wrong command"),
        }
    }

    #[test]
    fn test_cli_update_rejects_non_finite_salary() {
        let parsed =
            Cli::try_parse_from(["job-portal", "jobs", "update", "1", "--max-salary", "NaN"]);
        assert!(parsed.is_err());

        let cli =
            Cli::try_parse_from(["job-portal", "jobs", "update", "1", "--min-salary", "90000"])
                .unwrap();
        match cli.command {
            Command::Jobs(JobsCommand::Update(args)) => {
                assert_eq!(args.min_salary, Some(90000.0));
                assert_eq!(args.max_salary, None);
            }
            _ => panic!("wrong command"),
        }
    }

    #[test]
    fn test_render_reviews_uses_name_or_id() {
        let reviews = vec![
            Review {
                id: 1,
                job_id: 5,
                employee_id: 1,
                rating: Rating::new(3).unwrap(),
                text: "Great job".into(),
                employee_name: Some("Ana".into()),
            },
            Review {
                id: 2,
                job_id: 5,
                employee_id: 2,
                rating: Rating::new(5).unwrap(),
                text: "Fine".into(),
                employee_name: None,
            },
        ];
        let out = render_reviews(&reviews);
        assert!(out.contains("#1 job 5 ★★★☆☆ by Ana: Great job"));
        assert!(out.contains("#2 job 5 ★★★★★ by employee 2: Fine"));
    }
}
