//! Next recommended action for the dashboard.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::course::CourseState;

/// Everything the advisor looks at. Gathered fresh for every decision.
#[derive(Debug, Clone, Default)]
pub struct NextStepInputs {
    pub course: Option<CourseState>,
    /// A weekly plan exists for `course.current_week`.
    pub has_weekly_plan: bool,
    /// A daily entry exists for today.
    pub has_today_entry: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextStep {
    BeginOnboarding,
    SetMainGoal,
    CreateWeeklyPlan(u8),
    FillTodayTracker,
    ContinueWeek(u8),
}

impl NextStep {
    /// Stable machine-readable code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match *self {
            Self::BeginOnboarding => "begin_onboarding",
            Self::SetMainGoal => "set_main_goal",
            Self::CreateWeeklyPlan(_) => "create_weekly_plan",
            Self::FillTodayTracker => "fill_today_tracker",
            Self::ContinueWeek(_) => "continue_week",
        }
    }
}

impl fmt::Display for NextStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::BeginOnboarding => f.write_str("Začni onboarding rozhovor s AI koučem"),
            Self::SetMainGoal => {
                f.write_str("Dokonči diagnostický rozhovor a nastav svůj hlavní cíl")
            },
            Self::CreateWeeklyPlan(week) => write!(f, "Vytvoř týdenní plán pro týden {week}"),
            Self::FillTodayTracker => f.write_str("Vyplň dnešní tracker"),
            Self::ContinueWeek(week) => write!(f, "Pokračuj v týdnu {week}"),
        }
    }
}

impl Serialize for NextStep {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// First matching rule wins.
#[must_use]
pub fn advise_next_step(inputs: &NextStepInputs) -> NextStep {
    let Some(course) = inputs.course.as_ref() else {
        return NextStep::BeginOnboarding;
    };
    if course.resolved_goal().is_none() {
        return NextStep::SetMainGoal;
    }
    let week = course.current_week;
    if week >= 2 && !inputs.has_weekly_plan {
        return NextStep::CreateWeeklyPlan(week);
    }
    if !inputs.has_today_entry {
        return NextStep::FillTodayTracker;
    }
    NextStep::ContinueWeek(week)
}
