//! `codefolio`: terminal front end over the Codefolio REST API.
//!
//! Each subcommand builds one view, loads it, and prints it. Toasts raised
//! along the way are written to stderr; any error toast makes the command
//! exit non-zero.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::fmt::Display;
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use mockable::{Clock, DefaultClock};
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use frontend::FrontendSettings;
use frontend::domain::ports::{ToastLevel, Toaster};
use frontend::domain::{
    ApplicationDecision, ApplicationId, AvailabilitySlot, CourseId, DashboardPeriod, Error,
    MentorId, NotificationId, UserId,
};
use frontend::outbound::http::{
    ApiClient, HttpAdminService, HttpBookingService, HttpCourseService, HttpDashboardService,
    HttpMentorService, HttpNotificationService, HttpPaymentService, HttpUserService,
    HttpWishlistService,
};
use frontend::views::{
    ApplicationReviewPanel, AvailabilityEditor, BookingFlow, CheckoutFlow, CheckoutOutcome,
    HomePage, MentorModerationPanel, MentorProfileView, NotificationDialog, NotificationStore,
    ProfilePage, ProfilePanel, ProfileServices, ProfileTab, ToastQueue, ToggleOutcome,
    UserModerationPanel, WishlistPanel,
};

/// `codefolio` command arguments.
#[derive(Debug, Parser)]
#[command(
    name = "codefolio",
    about = "Browse courses, mentors, and your Codefolio profile from the terminal",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Top mentors and top courses.
    Home,
    /// Notification dialog.
    Notifications {
        /// Mark a notification read before rendering. Repeatable.
        #[arg(long = "read", value_name = "id")]
        read: Vec<NotificationId>,
    },
    /// Profile page with one tab mounted.
    Profile {
        #[arg(long, value_name = "tab", default_value = "dashboard")]
        tab: ProfileTab,
        /// Reporting window for the dashboard tab.
        #[arg(long, value_name = "week|month|year", default_value = "week")]
        period: DashboardPeriod,
    },
    /// Saved courses.
    Wishlist {
        /// Save a course before rendering.
        #[arg(long, value_name = "course-id", conflicts_with = "remove")]
        add: Option<CourseId>,
        /// Remove a course before rendering.
        #[arg(long, value_name = "course-id")]
        remove: Option<CourseId>,
    },
    /// Buy or enrol in a course.
    Checkout { course_id: CourseId },
    /// One mentor's profile.
    Mentor { mentor_id: MentorId },
    /// Book a session with a mentor, starting at an RFC 3339 time.
    Book {
        mentor_id: MentorId,
        start: DateTime<Utc>,
    },
    /// The signed-in mentor's weekly availability.
    Availability {
        /// Replace all slots and save, e.g. `--slot "mon 09:00-10:00"`.
        #[arg(long = "slot", value_name = "day HH:MM-HH:MM")]
        slots: Vec<AvailabilitySlot>,
    },
    /// Moderation screens; requires an admin session.
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },
}

#[derive(Debug, Subcommand)]
enum AdminCommand {
    Users,
    Mentors,
    Applications,
    /// Flip a user between active and inactive.
    ToggleUser {
        user_id: UserId,
        /// Confirm the change; without it nothing is sent.
        #[arg(long)]
        yes: bool,
    },
    /// Flip a mentor between active and inactive.
    ToggleMentor {
        mentor_id: MentorId,
        #[arg(long)]
        yes: bool,
    },
    /// Approve or reject a mentor application.
    Review {
        application_id: ApplicationId,
        decision: DecisionArg,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DecisionArg {
    Approve,
    Reject,
}

impl From<DecisionArg> for ApplicationDecision {
    fn from(value: DecisionArg) -> Self {
        match value {
            DecisionArg::Approve => Self::Approve,
            DecisionArg::Reject => Self::Reject,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let settings = match FrontendSettings::load_from_iter([OsString::from("codefolio")]) {
        Ok(settings) => settings,
        Err(error) => {
            write_line(io::stderr().lock(), format!("configuration error: {error}"));
            return ExitCode::FAILURE;
        }
    };
    init_tracing(settings.json_logs);

    let runtime = match Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            write_line(io::stderr().lock(), format!("create Tokio runtime: {error}"));
            return ExitCode::FAILURE;
        }
    };

    let toasts = Arc::new(ToastQueue::new());
    let outcome = runtime.block_on(run(cli.command, &settings, toasts.clone()));

    let mut failed = outcome.is_err();
    for toast in toasts.drain() {
        failed |= toast.level == ToastLevel::Error;
        write_line(io::stderr().lock(), &toast);
    }
    if let Err(error) = outcome {
        warn!(code = %error.code(), error = %error, "command failed");
    }
    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn init_tracing(json: bool) {
    let builder = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr);
    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}

fn write_line(mut out: impl Write, message: impl Display) {
    if let Err(err) = writeln!(out, "{message}") {
        drop(err);
    }
}

fn render(view: impl Display) {
    let mut out = io::stdout().lock();
    if let Err(err) = write!(out, "{view}") {
        drop(err);
    }
}

/// Adapters sharing one client, so one cookie store.
struct Services {
    api: ApiClient,
    toaster: Arc<dyn Toaster>,
}

impl Services {
    fn profile(&self) -> ProfileServices {
        ProfileServices {
            users: Arc::new(HttpUserService::new(self.api.clone())),
            dashboard: Arc::new(HttpDashboardService::new(self.api.clone())),
            courses: Arc::new(HttpCourseService::new(self.api.clone())),
            bookings: Arc::new(HttpBookingService::new(self.api.clone())),
            wishlist: Arc::new(HttpWishlistService::new(self.api.clone())),
            payments: Arc::new(HttpPaymentService::new(self.api.clone())),
            toaster: self.toaster.clone(),
        }
    }

    fn admin(&self) -> Arc<HttpAdminService> {
        Arc::new(HttpAdminService::new(self.api.clone()))
    }
}

async fn run(
    command: Command,
    settings: &FrontendSettings,
    toasts: Arc<ToastQueue>,
) -> Result<(), Error> {
    let base_url = settings
        .api_base_url()
        .map_err(|error| Error::invalid_request(error.to_string()))?;
    let api = ApiClient::new(base_url, settings.request_timeout())
        .map_err(|error| Error::internal(format!("build http client: {error}")))?;
    let services = Services {
        api,
        toaster: toasts,
    };
    let toaster = services.toaster.clone();

    match command {
        Command::Home => {
            let mut page = HomePage::new(
                Arc::new(HttpMentorService::new(services.api.clone())),
                Arc::new(HttpCourseService::new(services.api.clone())),
                toaster,
            );
            page.load().await;
            render(&page);
        }
        Command::Notifications { read } => {
            let store = Arc::new(NotificationStore::new(Arc::new(
                HttpNotificationService::new(services.api.clone()),
            )));
            let mut dialog = NotificationDialog::new(store, Arc::new(DefaultClock));
            dialog.mount().await;
            for id in &read {
                dialog.click(id);
            }
            dialog.open();
            render(&dialog);
        }
        Command::Profile { tab, period } => {
            let mut page = ProfilePage::new(services.profile());
            page.select(tab);
            if let ProfilePanel::Dashboard(panel) = page.panel_mut() {
                panel.set_period(period);
            }
            page.panel_mut().load().await;
            render(&page);
        }
        Command::Wishlist { add, remove } => {
            let service = Arc::new(HttpWishlistService::new(services.api.clone()));
            let mut panel = WishlistPanel::new(service, toaster);
            match (add, remove) {
                (Some(course_id), _) => panel.add(&course_id).await?,
                (None, Some(course_id)) => panel.remove(&course_id).await?,
                (None, None) => panel.load().await,
            }
            render(&panel);
        }
        Command::Checkout { course_id } => {
            let flow = CheckoutFlow::new(
                Arc::new(HttpCourseService::new(services.api.clone())),
                Arc::new(HttpPaymentService::new(services.api.clone())),
                toaster,
            );
            match flow.start(&course_id).await? {
                CheckoutOutcome::Enrolled { course } => {
                    render(format_args!("Enrolled in {}.\n", course.title));
                }
                CheckoutOutcome::Redirect { course, session } => {
                    render(format_args!(
                        "Complete payment for {} at:\n{}\n",
                        course.title, session.url
                    ));
                }
            }
        }
        Command::Mentor { mentor_id } => {
            let service = Arc::new(HttpMentorService::new(services.api.clone()));
            let mut view = MentorProfileView::new(service, toaster);
            let result = view.load(&mentor_id).await.map(drop);
            render(&view);
            result?;
        }
        Command::Book { mentor_id, start } => {
            let service = Arc::new(HttpBookingService::new(services.api.clone()));
            let flow = BookingFlow::new(service, toaster);
            let booking = flow.book(&mentor_id, start, DefaultClock.utc()).await?;
            render(format_args!(
                "Booking {} with {}: {} ({} min, {})\n",
                booking.id,
                booking.mentor_name,
                booking.start.format("%Y-%m-%d %H:%M UTC"),
                booking.duration_minutes,
                booking.status.as_str()
            ));
        }
        Command::Availability { slots } => {
            let service = Arc::new(HttpMentorService::new(services.api.clone()));
            let mut editor = AvailabilityEditor::new(service, toaster);
            editor.load().await;
            if !slots.is_empty() && editor.state().loaded().is_some() {
                editor.replace_slots(slots)?;
                editor.save().await?;
            }
            render(&editor);
        }
        Command::Admin { command } => run_admin(command, &services).await?,
    }
    Ok(())
}

async fn run_admin(command: AdminCommand, services: &Services) -> Result<(), Error> {
    let toaster = services.toaster.clone();
    match command {
        AdminCommand::Users => {
            let mut panel = UserModerationPanel::new(services.admin(), toaster);
            panel.load().await;
            render(&panel);
        }
        AdminCommand::Mentors => {
            let mut panel = MentorModerationPanel::new(services.admin(), toaster);
            panel.load().await;
            render(&panel);
        }
        AdminCommand::Applications => {
            let mut panel = ApplicationReviewPanel::new(services.admin(), toaster);
            panel.load().await;
            render(&panel);
        }
        AdminCommand::ToggleUser { user_id, yes } => {
            let mut panel = UserModerationPanel::new(services.admin(), toaster);
            panel.load().await;
            report_toggle(panel.toggle_status(&user_id, yes).await?);
        }
        AdminCommand::ToggleMentor { mentor_id, yes } => {
            let mut panel = MentorModerationPanel::new(services.admin(), toaster);
            panel.load().await;
            report_toggle(panel.toggle_status(&mentor_id, yes).await?);
        }
        AdminCommand::Review {
            application_id,
            decision,
        } => {
            let mut panel = ApplicationReviewPanel::new(services.admin(), toaster);
            let status = panel.review(&application_id, decision.into()).await?;
            render(format_args!("Application {application_id} {}\n", status.as_str()));
        }
    }
    Ok(())
}

fn report_toggle(outcome: ToggleOutcome) {
    match outcome {
        ToggleOutcome::Unconfirmed => render("Not changed: re-run with --yes to confirm.\n"),
        ToggleOutcome::Updated(status) => render(format_args!("Status is now {status}.\n")),
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for argument parsing.

    use clap::CommandFactory;
    use rstest::rstest;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[rstest]
    fn parses_profile_tab_and_period() {
        let cli = Cli::try_parse_from([
            "codefolio",
            "profile",
            "--tab",
            "purchase-history",
            "--period",
            "month",
        ])
        .expect("arguments parse");
        let Command::Profile { tab, period } = cli.command else {
            panic!("expected profile command");
        };
        assert_eq!(tab, ProfileTab::PurchaseHistory);
        assert_eq!(period, DashboardPeriod::Month);
    }

    #[rstest]
    fn parses_repeated_availability_slots() {
        let cli = Cli::try_parse_from([
            "codefolio",
            "availability",
            "--slot",
            "mon 09:00-10:00",
            "--slot",
            "tue 14:00-15:30",
        ])
        .expect("arguments parse");
        let Command::Availability { slots } = cli.command else {
            panic!("expected availability command");
        };
        assert_eq!(slots.len(), 2);
    }

    #[rstest]
    #[case::blank_id(&["codefolio", "mentor", ""])]
    #[case::bad_slot(&["codefolio", "availability", "--slot", "someday"])]
    #[case::bad_time(&["codefolio", "book", "m1", "tomorrow"])]
    #[case::bad_decision(&["codefolio", "admin", "review", "a1", "maybe"])]
    fn rejects_malformed_arguments(#[case] args: &[&str]) {
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[rstest]
    fn toggle_requires_explicit_yes_flag() {
        let cli = Cli::try_parse_from(["codefolio", "admin", "toggle-user", "u1"])
            .expect("arguments parse");
        let Command::Admin {
            command: AdminCommand::ToggleUser { yes, .. },
        } = cli.command
        else {
            panic!("expected toggle-user command");
        };
        assert!(!yes);
    }
}
