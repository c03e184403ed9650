use std::fmt;

use crate::presentation::formatters::{Tone, format_date, paint};
use crate::presentation::view_models::{
    ConfigViewModel, LoginViewModel, ProfileViewModel, SessionViewModel, ViewMode,
};

pub struct SessionView<'a> {
    data: &'a SessionViewModel,
    mode: ViewMode,
}

impl<'a> SessionView<'a> {
    pub fn new(data: &'a SessionViewModel, mode: ViewMode) -> Self {
        Self { data, mode }
    }
}

impl<'a> fmt::Display for SessionView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (&self.data.user_id, self.mode) {
            (Some(user), ViewMode::Minimal) => writeln!(f, "{}", user),
            (Some(user), _) => {
                let role = if self.data.is_admin { "admin" } else { "student" };
                writeln!(f, "User {} ({})", paint(user, Tone::Strong), role)
            }
            (None, ViewMode::Minimal) => Ok(()),
            (None, _) => writeln!(f, "Not logged in."),
        }
    }
}

pub struct LoginView<'a> {
    data: &'a LoginViewModel,
    mode: ViewMode,
}

impl<'a> LoginView<'a> {
    pub fn new(data: &'a LoginViewModel, mode: ViewMode) -> Self {
        Self { data, mode }
    }
}

impl<'a> fmt::Display for LoginView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.mode == ViewMode::Minimal {
            return writeln!(f, "{}", self.data.user_id);
        }
        writeln!(f, "Logged in as user {}", paint(&self.data.user_id, Tone::Strong))
    }
}

pub struct ProfileView<'a> {
    data: &'a ProfileViewModel,
    mode: ViewMode,
}

impl<'a> ProfileView<'a> {
    pub fn new(data: &'a ProfileViewModel, mode: ViewMode) -> Self {
        Self { data, mode }
    }
}

impl<'a> fmt::Display for ProfileView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let p = self.data;
        if self.mode == ViewMode::Minimal {
            return writeln!(f, "{}", p.student_id);
        }

        writeln!(f, "{}", paint(&p.name, Tone::Strong))?;
        writeln!(f, "  Email:        {}", p.email)?;
        writeln!(f, "  Student ID:   {}", p.student_id)?;
        writeln!(f, "  Registered:   {}", format_date(p.registration_date))?;
        writeln!(f, "  Status:       {}", p.status.as_str())?;
        writeln!(f)?;
        writeln!(f, "  Borrowed:     {}/{}", p.stats.borrowed, p.max_books)?;
        writeln!(
            f,
            "  Overdue:      {}",
            paint(
                &p.stats.overdue.to_string(),
                if p.stats.overdue > 0 { Tone::Bad } else { Tone::Good }
            )
        )?;
        writeln!(f, "  Renewals:     {}", p.stats.renewals)?;
        if let Some(slots) = p.stats.available_slots {
            writeln!(f, "  Slots left:   {}", slots)?;
        }
        Ok(())
    }
}

pub struct ConfigView<'a> {
    data: &'a ConfigViewModel,
    mode: ViewMode,
}

impl<'a> ConfigView<'a> {
    pub fn new(data: &'a ConfigViewModel, mode: ViewMode) -> Self {
        Self { data, mode }
    }
}

impl<'a> fmt::Display for ConfigView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let c = self.data;
        if self.mode == ViewMode::Minimal {
            return writeln!(f, "{}", c.base_url);
        }

        let file_note = if c.config_file_exists { "" } else { " (defaults, no config.toml)" };
        writeln!(f, "Workspace: {}{}", c.data_dir.display(), file_note)?;
        writeln!(f)?;
        writeln!(f, "[backend]")?;
        writeln!(f, "  base_url       = {}", c.base_url)?;
        match c.timeout_secs {
            Some(secs) => writeln!(f, "  timeout_secs   = {}", secs)?,
            None => writeln!(f, "  timeout_secs   = (client default)")?,
        }
        writeln!(f, "[loans]")?;
        writeln!(f, "  renewal_days   = {}", c.renewal_days)?;
        writeln!(f, "  due_soon_days  = {}", c.due_soon_days)?;
        writeln!(f, "  renewal_mode   = {}", c.renewal_mode)?;
        writeln!(f, "  overdue_policy = {}", c.overdue_policy)?;
        writeln!(f, "[catalog]")?;
        writeln!(f, "  placeholder_cover = {}", c.placeholder_cover)
    }
}
