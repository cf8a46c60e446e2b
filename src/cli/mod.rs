//! CLI command definitions and handlers

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

use crate::client::models::{ApplicationStatus, ConnectionAction, Role};

pub mod args;
pub mod auth;
pub mod chat;
pub mod context;
pub mod job;
pub mod local;
pub mod navigate;
pub mod profile;
pub mod project;
pub mod status;

pub use args::{GlobalOptions, OutputFormat};
pub use context::CommandContext;

/// SkillBridge - terminal client for the SkillBridge project-matching platform
#[derive(Parser, Debug)]
#[command(name = "skillbridge")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json)
    #[arg(long, global = true, env = "SKILLBRIDGE_FORMAT", hide_env = true)]
    pub format: Option<OutputFormat>,

    /// Override config file location
    #[arg(long, global = true, env = "SKILLBRIDGE_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// API root, e.g. http://localhost:8080/api
    #[arg(long, global = true, env = "SKILLBRIDGE_API_URL", hide_env = true)]
    pub api_url: Option<String>,

    /// Override the storage file holding the session and preferences
    #[arg(long, global = true, env = "SKILLBRIDGE_STORAGE", hide_env = true)]
    pub storage: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "SKILLBRIDGE_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in with email and password
    Login {
        #[arg(long)]
        email: Option<String>,

        /// Password (prompted when omitted)
        #[arg(long, env = "SKILLBRIDGE_PASSWORD", hide_env = true)]
        password: Option<String>,
    },

    /// Create an account
    Signup {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        /// student, company or guide
        #[arg(long)]
        role: Role,

        /// Password (prompted when omitted)
        #[arg(long, env = "SKILLBRIDGE_PASSWORD", hide_env = true)]
        password: Option<String>,

        #[arg(long)]
        company_name: Option<String>,

        #[arg(long)]
        university: Option<String>,
    },

    /// Sign in with a Google ID token
    GoogleLogin {
        /// Credential returned by Google sign-in
        #[arg(long)]
        token: String,

        /// Role for a first sign-in
        #[arg(long, default_value = "student")]
        role: Role,
    },

    /// Clear the local session
    Logout,

    /// Show session, configuration and theme status
    Status,

    /// Open a screen by path, e.g. /projects or /chat/3/2
    #[command(after_help = "\
EXAMPLES:
  skillbridge open /projects
  skillbridge open /projects/42
  skillbridge open /applied-projects --format table
  skillbridge open /chat/3/2")]
    Open {
        /// Route path
        path: String,
    },

    /// Apply to a project (students)
    Apply {
        project_id: u64,
    },

    /// Withdraw a project application (students)
    Withdraw {
        project_id: u64,
    },

    /// Manage projects
    #[command(subcommand)]
    Project(ProjectCommands),

    /// Submit and review project work
    #[command(subcommand)]
    Submission(SubmissionCommands),

    /// Talk to guides
    #[command(subcommand)]
    Chat(ChatCommands),

    /// Guide actions
    #[command(subcommand)]
    Guide(GuideCommands),

    /// Jobs and job applications
    #[command(subcommand)]
    Job(JobCommands),

    /// Edit your profile
    #[command(subcommand)]
    Profile(ProfileCommands),

    /// Generate a resume
    #[command(subcommand)]
    Resume(ResumeCommands),

    /// Local notifications
    #[command(subcommand)]
    Notifications(NotificationCommands),

    /// Light/dark theme
    #[command(subcommand)]
    Theme(ThemeCommands),

    /// Generate shell completions
    #[command(after_help = "\
  bash:   skillbridge completion bash > /etc/bash_completion.d/skillbridge
  zsh:    skillbridge completion zsh > \"${fpath[1]}/_skillbridge\"
  fish:   skillbridge completion fish > ~/.config/fish/completions/skillbridge.fish")]
    Completion {
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Display version information
    Version,
}

/// Project management subcommands
#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// Post a new project (companies)
    Post {
        #[arg(long)]
        title: String,

        #[arg(long)]
        description: String,

        #[arg(long, default_value = "")]
        requirements: String,

        /// Comma-separated skills
        #[arg(long, default_value = "")]
        skills: String,

        #[arg(long, default_value = "")]
        budget: String,

        /// YYYY-MM-DD
        #[arg(long)]
        deadline: Option<String>,

        #[arg(long, default_value = "")]
        difficulty: String,

        #[arg(long, default_value = "")]
        duration: String,

        #[arg(long, default_value = "")]
        team_size: String,

        #[arg(long, default_value = "")]
        location: String,
    },

    /// Delete a posted project (companies)
    Delete {
        project_id: u64,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Link a GitHub repository to an accepted application (students)
    SubmitRepo {
        project_id: u64,

        #[arg(long)]
        url: String,
    },

    /// List applicants of a project (companies)
    Applicants {
        project_id: u64,
    },
}

/// Submission subcommands
#[derive(Subcommand, Debug)]
pub enum SubmissionCommands {
    /// Submit work for a project (students)
    Submit {
        project_id: u64,

        #[arg(long)]
        github_link: String,

        #[arg(long, default_value = "")]
        notes: String,
    },

    /// Review a submission (companies, guides)
    Review {
        submission_id: u64,

        /// accepted, rejected or changes_requested
        #[arg(long)]
        status: String,

        #[arg(long)]
        feedback: Option<String>,

        /// Change an existing review instead of creating one
        #[arg(long)]
        update: bool,
    },
}

/// Chat subcommands
#[derive(Subcommand, Debug)]
pub enum ChatCommands {
    /// Ask a guide to connect (students)
    Start {
        guide_id: u64,
    },

    /// Send a message in a student/guide thread
    Send {
        #[arg(long)]
        student_id: u64,

        #[arg(long)]
        guide_id: u64,

        message: String,
    },
}

/// Guide subcommands
#[derive(Subcommand, Debug)]
pub enum GuideCommands {
    /// Accept or reject a connection request
    Confirm {
        request_id: u64,

        #[arg(value_enum)]
        action: ConnectionAction,
    },
}

/// Job subcommands
#[derive(Subcommand, Debug)]
pub enum JobCommands {
    /// Post a job (companies)
    Post {
        #[command(flatten)]
        job: JobFields,
    },

    /// Replace a job's details (companies)
    Update {
        job_id: u64,

        #[command(flatten)]
        job: JobFields,
    },

    /// Delete a job (companies)
    Delete {
        job_id: u64,

        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Apply to a job (students)
    Apply {
        job_id: u64,

        #[arg(long)]
        cover_letter: Option<String>,

        /// Link to a resume
        #[arg(long)]
        resume: Option<String>,
    },

    /// List applications to a job (companies)
    Applications {
        job_id: u64,

        #[arg(long, value_enum)]
        status: Option<ApplicationStatus>,
    },

    /// Move a job application to a new status (companies)
    Status {
        application_id: u64,

        #[arg(value_enum)]
        status: ApplicationStatus,
    },
}

/// Fields of a job posting
#[derive(Debug, Clone, clap::Args)]
pub struct JobFields {
    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub description: String,

    #[arg(long, default_value = "")]
    pub category: String,

    #[arg(long, default_value = "")]
    pub domain: String,

    #[arg(long, default_value = "")]
    pub location: String,

    #[arg(long, default_value_t = 0)]
    pub stipend: i64,

    #[arg(long)]
    pub currency: Option<String>,

    /// Years of experience
    #[arg(long, default_value_t = 0)]
    pub experience: i64,

    /// Repeatable
    #[arg(long = "requirement")]
    pub requirements: Vec<String>,

    /// Comma-separated skills
    #[arg(long, value_delimiter = ',')]
    pub skills: Vec<String>,

    /// YYYY-MM-DD
    #[arg(long)]
    pub deadline: String,
}

/// Profile subcommands
#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// Update profile fields; omitted fields are left unchanged
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        github_url: Option<String>,
        #[arg(long)]
        linkedin: Option<String>,
        #[arg(long)]
        portfolio_url: Option<String>,
        #[arg(long)]
        skills: Option<String>,
        #[arg(long)]
        university: Option<String>,
        #[arg(long)]
        major: Option<String>,
        #[arg(long)]
        year: Option<String>,
        #[arg(long)]
        company_name: Option<String>,
        #[arg(long)]
        position: Option<String>,
    },
}

/// Resume subcommands
#[derive(Subcommand, Debug)]
pub enum ResumeCommands {
    /// Generate a resume from a JSON or YAML description
    Generate {
        /// File with location, experience, education, projects, certifications
        #[arg(long)]
        file: String,
    },
}

/// Notification subcommands
#[derive(Subcommand, Debug)]
pub enum NotificationCommands {
    /// List notifications, newest first
    List,

    /// Dismiss one notification
    Read { id: i64 },

    /// Dismiss all notifications
    ReadAll,
}

/// Theme subcommands
#[derive(Subcommand, Debug)]
pub enum ThemeCommands {
    /// Show the current theme
    Show,

    /// Switch between light and dark
    Toggle,
}
