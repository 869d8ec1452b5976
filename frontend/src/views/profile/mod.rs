//! Profile page and its tab switcher.
//!
//! The page mounts exactly one panel at a time. Selecting a tab drops the
//! previous panel, including any loaded data, and mounts a fresh one.

mod panels;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tracing::debug;

pub use panels::{
    BookedMentor, DashboardPanel, EnrolledCoursesPanel, MessagesPanel, PurchaseHistoryPanel,
    SettingsPanel, TeachersPanel,
};

use super::WishlistPanel;
use crate::domain::ports::{
    BookingService, CourseService, DashboardService, PaymentService, Toaster, UserService,
    WishlistService,
};

/// The closed set of profile tabs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ProfileTab {
    /// Learning statistics; the landing tab.
    #[default]
    Dashboard,
    /// Enrolled courses with progress.
    Courses,
    /// Mentors the user has booked.
    Teachers,
    /// Messaging placeholder.
    Message,
    /// Saved courses.
    Wishlist,
    /// Completed purchases.
    PurchaseHistory,
    /// Profile editing.
    Settings,
}

impl ProfileTab {
    /// Every tab in display order.
    pub const ALL: [Self; 7] = [
        Self::Dashboard,
        Self::Courses,
        Self::Teachers,
        Self::Message,
        Self::Wishlist,
        Self::PurchaseHistory,
        Self::Settings,
    ];

    /// Tab bar caption.
    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Courses => "Courses",
            Self::Teachers => "Teachers",
            Self::Message => "Message",
            Self::Wishlist => "Wishlist",
            Self::PurchaseHistory => "Purchase History",
            Self::Settings => "Settings",
        }
    }
}

impl fmt::Display for ProfileTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ProfileTab {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted = raw.trim().to_ascii_lowercase().replace(['-', '_'], " ");
        Self::ALL
            .into_iter()
            .find(|tab| tab.label().to_ascii_lowercase() == wanted)
            .ok_or_else(|| format!("unknown profile tab '{raw}'"))
    }
}

/// Ports the profile panels draw on.
#[derive(Clone)]
pub struct ProfileServices {
    /// Profile reads and updates.
    pub users: Arc<dyn UserService>,
    /// Dashboard statistics.
    pub dashboard: Arc<dyn DashboardService>,
    /// Enrolled courses.
    pub courses: Arc<dyn CourseService>,
    /// Booked sessions.
    pub bookings: Arc<dyn BookingService>,
    /// Wishlist reads and edits.
    pub wishlist: Arc<dyn WishlistService>,
    /// Purchase history.
    pub payments: Arc<dyn PaymentService>,
    /// Shared feedback channel.
    pub toaster: Arc<dyn Toaster>,
}

/// The single mounted child of the profile page.
pub enum ProfilePanel {
    /// Mounted under [`ProfileTab::Dashboard`].
    Dashboard(DashboardPanel),
    /// Mounted under [`ProfileTab::Courses`].
    Courses(EnrolledCoursesPanel),
    /// Mounted under [`ProfileTab::Teachers`].
    Teachers(TeachersPanel),
    /// Mounted under [`ProfileTab::Message`].
    Message(MessagesPanel),
    /// Mounted under [`ProfileTab::Wishlist`].
    Wishlist(WishlistPanel),
    /// Mounted under [`ProfileTab::PurchaseHistory`].
    PurchaseHistory(PurchaseHistoryPanel),
    /// Mounted under [`ProfileTab::Settings`].
    Settings(SettingsPanel),
}

impl ProfilePanel {
    fn mount(tab: ProfileTab, services: &ProfileServices) -> Self {
        let toaster = services.toaster.clone();
        match tab {
            ProfileTab::Dashboard => {
                Self::Dashboard(DashboardPanel::new(services.dashboard.clone(), toaster))
            }
            ProfileTab::Courses => {
                Self::Courses(EnrolledCoursesPanel::new(services.courses.clone(), toaster))
            }
            ProfileTab::Teachers => {
                Self::Teachers(TeachersPanel::new(services.bookings.clone(), toaster))
            }
            ProfileTab::Message => Self::Message(MessagesPanel),
            ProfileTab::Wishlist => {
                Self::Wishlist(WishlistPanel::new(services.wishlist.clone(), toaster))
            }
            ProfileTab::PurchaseHistory => Self::PurchaseHistory(PurchaseHistoryPanel::new(
                services.payments.clone(),
                toaster,
            )),
            ProfileTab::Settings => {
                Self::Settings(SettingsPanel::new(services.users.clone(), toaster))
            }
        }
    }

    /// Tab this panel belongs to.
    pub fn tab(&self) -> ProfileTab {
        match self {
            Self::Dashboard(_) => ProfileTab::Dashboard,
            Self::Courses(_) => ProfileTab::Courses,
            Self::Teachers(_) => ProfileTab::Teachers,
            Self::Message(_) => ProfileTab::Message,
            Self::Wishlist(_) => ProfileTab::Wishlist,
            Self::PurchaseHistory(_) => ProfileTab::PurchaseHistory,
            Self::Settings(_) => ProfileTab::Settings,
        }
    }

    /// Load the panel's data through its port.
    pub async fn load(&mut self) {
        match self {
            Self::Dashboard(panel) => panel.load().await,
            Self::Courses(panel) => panel.load().await,
            Self::Teachers(panel) => panel.load().await,
            Self::Message(_) => {}
            Self::Wishlist(panel) => panel.load().await,
            Self::PurchaseHistory(panel) => panel.load().await,
            Self::Settings(panel) => panel.load().await,
        }
    }
}

impl fmt::Display for ProfilePanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dashboard(panel) => fmt::Display::fmt(panel, f),
            Self::Courses(panel) => fmt::Display::fmt(panel, f),
            Self::Teachers(panel) => fmt::Display::fmt(panel, f),
            Self::Message(panel) => fmt::Display::fmt(panel, f),
            Self::Wishlist(panel) => fmt::Display::fmt(panel, f),
            Self::PurchaseHistory(panel) => fmt::Display::fmt(panel, f),
            Self::Settings(panel) => fmt::Display::fmt(panel, f),
        }
    }
}

/// Result of a tab change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabTransition {
    /// Tab whose panel was dropped.
    pub unmounted: ProfileTab,
    /// Tab whose panel replaced it.
    pub mounted: ProfileTab,
}

/// Profile page: a tab bar over one mounted [`ProfilePanel`].
///
/// The active tab is not persisted; every new page starts on
/// [`ProfileTab::Dashboard`].
pub struct ProfilePage {
    services: ProfileServices,
    panel: ProfilePanel,
}

impl ProfilePage {
    /// Open the page on the dashboard tab.
    pub fn new(services: ProfileServices) -> Self {
        let panel = ProfilePanel::mount(ProfileTab::default(), &services);
        Self { services, panel }
    }

    /// Currently selected tab.
    pub fn active(&self) -> ProfileTab {
        self.panel.tab()
    }

    /// Mounted panel.
    pub fn panel(&self) -> &ProfilePanel {
        &self.panel
    }

    /// Mounted panel, for loading or edits.
    pub fn panel_mut(&mut self) -> &mut ProfilePanel {
        &mut self.panel
    }

    /// Activate `tab`, replacing the mounted panel.
    ///
    /// Returns `None` when `tab` is already active; the mounted panel and its
    /// data are kept in that case.
    pub fn select(&mut self, tab: ProfileTab) -> Option<TabTransition> {
        let unmounted = self.active();
        if unmounted == tab {
            return None;
        }
        self.panel = ProfilePanel::mount(tab, &self.services);
        debug!(from = %unmounted, to = %tab, "profile tab switched");
        Some(TabTransition {
            unmounted,
            mounted: tab,
        })
    }
}

impl fmt::Display for ProfilePage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let active = self.active();
        let tabs = ProfileTab::ALL
            .iter()
            .map(|tab| {
                if *tab == active {
                    format!("[{tab}]")
                } else {
                    tab.label().to_owned()
                }
            })
            .collect::<Vec<_>>()
            .join(" | ");
        writeln!(f, "{tabs}")?;
        writeln!(f)?;
        fmt::Display::fmt(&self.panel, f)
    }
}
