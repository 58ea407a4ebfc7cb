use chrono::Local;

use super::*;

impl App {
    pub(super) fn on_vm_tick(&mut self) -> Vec<Command> {
        if self.paused {
            return Vec::new();
        }
        vec![Command::FetchVm]
    }

    pub(super) fn on_sessions_tick(&mut self) -> Vec<Command> {
        if self.paused {
            return Vec::new();
        }
        vec![Command::LoadDashboard { force: false }]
    }

    /// Install a new snapshot and push filtered views into every panel.
    pub(super) fn apply_dashboard(&mut self, data: DashboardData) {
        tracing::debug!(
            sessions = data.sessions.len(),
            days = data.daily_activity.len(),
            "Applying dashboard snapshot"
        );
        self.vm_status = data.vm_status.clone();
        self.data = Some(data);
        self.push_views();
    }

    /// VM ticks only feed the header; the snapshot is replaced whole.
    pub(super) fn apply_vm_status(&mut self, status: VmStatus) {
        self.vm_status = status;
    }

    pub(super) fn cycle_time_range(&mut self) {
        self.time_range = self.time_range.next();
        tracing::debug!(range = %self.time_range, "Changed time range");
        self.push_views();
    }

    pub(super) fn resize(&mut self, width: u16, height: u16) {
        self.layout = DashboardLayout::new(width, height);
        for id in PanelId::ALL {
            let height = self.layout.panel(id).height;
            self.panel_mut(id).set_height(height);
        }
    }

    fn push_views(&mut self) {
        let Some(data) = self.data.as_ref() else {
            return;
        };
        let now = Local::now();
        let range = self.time_range;

        self.stats.update(data, range, now);
        self.activity
            .update(data.filter_daily_activity(range, now), range);
        self.projects.update(data.filter_projects(range, now), range);
        self.sessions.update(data.filter_sessions(range, now), range);
    }
}
