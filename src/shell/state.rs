use crate::modules::rooms::adapters::outbound::room_repository_in_memory::InMemoryRoomRepository;
use crate::modules::rooms::use_cases::manage_rooms::handler::RoomHandler;
use crate::modules::sessions::adapters::outbound::session_log::AggregateStatsRepository;
use crate::modules::sessions::adapters::outbound::session_log_in_memory::InMemorySessionStore;
use crate::modules::sessions::use_cases::log_focus_session::handler::LogFocusSessionHandler;
use crate::modules::sessions::use_cases::weekly_stats::handler::WeeklyStatsHandler;
use crate::modules::tasks::adapters::outbound::task_repository_in_memory::InMemoryTaskRepository;
use crate::modules::tasks::use_cases::guest_tasks::handler::GuestTaskHandler;
use crate::modules::tasks::use_cases::manage_tasks::handler::TaskHandler;
use crate::modules::timer::adapters::outbound::timer_settings_in_memory::InMemoryTimerSettings;
use crate::modules::timer::use_cases::run_personal_timer::registry::PersonalTimers;
use crate::modules::timer::use_cases::timer_settings::handler::TimerSettingsHandler;
use crate::shared::core::primitives::Clock;
use crate::shared::infrastructure::change_feed::ChangeFeed;
use crate::shared::infrastructure::local_store::LocalStore;
use std::sync::Arc;
use std::time::Duration;

/// The store-backed adapters, before they are shared.
#[derive(Default)]
pub struct InMemoryAdapters {
    pub sessions: InMemorySessionStore,
    pub tasks: InMemoryTaskRepository,
    pub timer_settings: InMemoryTimerSettings,
    pub rooms: InMemoryRoomRepository,
}

#[derive(Clone)]
pub struct AppState {
    pub clock: Arc<dyn Clock>,
    pub feed: ChangeFeed,
    pub local_store: Arc<dyn LocalStore>,
    pub timer_settings: Arc<TimerSettingsHandler>,
    pub personal_timers: Arc<PersonalTimers>,
    pub log_session: Arc<LogFocusSessionHandler<InMemorySessionStore, InMemorySessionStore>>,
    pub weekly_stats: Arc<WeeklyStatsHandler>,
    pub aggregate_stats: Arc<dyn AggregateStatsRepository>,
    pub tasks: Arc<TaskHandler<InMemoryTaskRepository>>,
    pub guest_tasks: Arc<GuestTaskHandler>,
    pub rooms: Arc<RoomHandler<InMemoryRoomRepository>>,
}

impl AppState {
    pub fn new(
        adapters: InMemoryAdapters,
        local_store: Arc<dyn LocalStore>,
        clock: Arc<dyn Clock>,
        tick_period: Duration,
        session_history: usize,
    ) -> Self {
        let feed = ChangeFeed::new();
        let sessions = Arc::new(adapters.sessions);
        let tasks = Arc::new(adapters.tasks);

        let timer_settings = Arc::new(TimerSettingsHandler::new(Arc::new(
            adapters.timer_settings,
        )));
        let log_session = Arc::new(LogFocusSessionHandler::new(
            sessions.clone(),
            sessions.clone(),
            clock.clone(),
            feed.clone(),
        ));
        let personal_timers = Arc::new(PersonalTimers::new(
            timer_settings.clone(),
            log_session.clone(),
            tick_period,
        ));
        let weekly_stats = Arc::new(WeeklyStatsHandler::new(
            sessions.clone(),
            tasks.clone(),
            local_store.clone(),
            clock.clone(),
            session_history,
        ));
        let task_handler = Arc::new(TaskHandler::new(tasks, clock.clone(), feed.clone()));
        let guest_tasks = Arc::new(GuestTaskHandler::new(local_store.clone()));
        let rooms = Arc::new(RoomHandler::new(
            Arc::new(adapters.rooms),
            timer_settings.clone(),
            clock.clone(),
            feed.clone(),
        ));

        Self {
            clock,
            feed,
            local_store,
            timer_settings,
            personal_timers,
            log_session,
            weekly_stats,
            aggregate_stats: sessions,
            tasks: task_handler,
            guest_tasks,
            rooms,
        }
    }
}
