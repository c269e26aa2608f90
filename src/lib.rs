pub mod shared {
    pub mod core {
        pub mod primitives;
    }
    pub mod infrastructure {
        pub mod change_feed;
        pub mod local_store;
    }
}

pub mod modules {
    pub mod timer {
        pub mod core {
            pub mod engine;
            pub mod events;
            pub mod settings;
            pub mod state;
        }
        pub mod use_cases {
            pub mod run_personal_timer {
                pub mod registry;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod timer_settings {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod session_recorder;
                pub mod timer_settings;
                pub mod timer_settings_in_memory;
            }
        }
    }

    pub mod sessions {
        pub mod core {
            pub mod aggregate;
            pub mod goals;
            pub mod session;
        }
        pub mod use_cases {
            pub mod log_focus_session {
                pub mod decide;
                pub mod decision;
                pub mod handler;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
            }
            pub mod weekly_stats {
                pub mod handler;
                pub mod watcher;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
            }
            pub mod leaderboard {
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
            }
            pub mod goals {
                pub mod inbound {
                    pub mod http;
                }
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod session_log;
                pub mod session_log_in_memory;
            }
        }
    }

    pub mod tasks {
        pub mod core {
            pub mod guest_task;
            pub mod task;
        }
        pub mod use_cases {
            pub mod manage_tasks {
                pub mod decide;
                pub mod decision;
                pub mod handler;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
            }
            pub mod guest_tasks {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod task_repository;
                pub mod task_repository_in_memory;
            }
        }
    }

    pub mod rooms {
        pub mod core {
            pub mod room;
            pub mod shared_timer;
        }
        pub mod use_cases {
            pub mod manage_rooms {
                pub mod handler;
                pub mod session;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod room_repository;
                pub mod room_repository_in_memory;
            }
        }
    }

    pub mod preferences {
        pub mod core {
            pub mod theme;
        }
        pub mod use_cases {
            pub mod theme {
                pub mod inbound {
                    pub mod http;
                }
            }
        }
    }
}

pub mod shell;
