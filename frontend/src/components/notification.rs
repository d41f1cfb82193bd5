use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::warn;
use yew::prelude::*;

const ENTER_DELAY_MS: u32 = 100;
const LEAVE_DURATION_MS: u32 = 300;
pub const DEFAULT_DURATION_MS: u32 = 5000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Warning,
    Error,
}

impl NoticeKind {
    fn class(self) -> &'static str {
        match self {
            NoticeKind::Info => "notification-info",
            NoticeKind::Success => "notification-success",
            NoticeKind::Warning => "notification-warning",
            NoticeKind::Error => "notification-error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
    pub duration_ms: u32,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind,
            duration_ms: DEFAULT_DURATION_MS,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, message)
    }

    pub fn with_duration(mut self, duration_ms: u32) -> Self {
        self.duration_ms = duration_ms;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Entering,
    Shown,
    Leaving,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ActiveNotice {
    pub id: u64,
    pub notice: Notice,
    pub phase: Phase,
}

/// Holds the single banner currently on screen.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NoticeBoard {
    pub current: Option<ActiveNotice>,
    next_id: u64,
}

pub enum NoticeAction {
    Show(Notice),
    Reveal(u64),
    Dismiss(u64),
    Remove(u64),
}

impl NoticeBoard {
    fn apply(&mut self, action: NoticeAction) {
        match action {
            NoticeAction::Show(notice) => {
                self.next_id += 1;
                self.current = Some(ActiveNotice {
                    id: self.next_id,
                    notice,
                    phase: Phase::Entering,
                });
            }
            NoticeAction::Reveal(id) => self.set_phase(id, Phase::Entering, Phase::Shown),
            NoticeAction::Dismiss(id) => {
                if let Some(active) = self.current.as_mut().filter(|a| a.id == id) {
                    active.phase = Phase::Leaving;
                }
            }
            NoticeAction::Remove(id) => {
                if self.current.as_ref().map_or(false, |a| a.id == id) {
                    self.current = None;
                }
            }
        }
    }

    // Actions carry the id they were scheduled for; late timers from a
    // replaced banner must not touch its successor.
    fn set_phase(&mut self, id: u64, from: Phase, to: Phase) {
        if let Some(active) = self.current.as_mut() {
            if active.id == id && active.phase == from {
                active.phase = to;
            }
        }
    }
}

impl Reducible for NoticeBoard {
    type Action = NoticeAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        next.into()
    }
}

/// Context handle used by widgets to raise a banner.
#[derive(Clone, PartialEq)]
pub struct NotifyHandle(Callback<Notice>);

impl NotifyHandle {
    pub fn show(&self, notice: Notice) {
        self.0.emit(notice);
    }
}

#[hook]
pub fn use_notify() -> NotifyHandle {
    use_context::<NotifyHandle>().unwrap_or_else(|| {
        warn!("notification requested outside of a NotificationHost");
        NotifyHandle(Callback::from(|notice: Notice| warn!("dropped notice: {}", notice.message)))
    })
}

#[derive(Properties, PartialEq)]
pub struct NotificationHostProps {
    #[prop_or_default]
    pub children: Children,
}

#[function_component(NotificationHost)]
pub fn notification_host(props: &NotificationHostProps) -> Html {
    let board = use_reducer(NoticeBoard::default);

    let handle = {
        let board = board.dispatcher();
        use_memo(
            move |_| {
                NotifyHandle(Callback::from(move |notice: Notice| {
                    board.dispatch(NoticeAction::Show(notice));
                }))
            },
            (),
        )
    };

    // One timer per (banner, phase). Changing either drops the old handle,
    // which cancels it.
    let timer_key = board
        .current
        .as_ref()
        .map(|a| (a.id, a.phase, a.notice.duration_ms));
    {
        let dispatcher = board.dispatcher();
        use_effect_with_deps(
            move |key| {
                let timeout = key.map(|(id, phase, duration)| {
                    let (delay, action): (u32, fn(u64) -> NoticeAction) = match phase {
                        Phase::Entering => (ENTER_DELAY_MS, NoticeAction::Reveal),
                        Phase::Shown => (duration, NoticeAction::Dismiss),
                        Phase::Leaving => (LEAVE_DURATION_MS, NoticeAction::Remove),
                    };
                    Timeout::new(delay, move || dispatcher.dispatch(action(id)))
                });
                move || drop(timeout)
            },
            timer_key,
        );
    }

    let banner = board.current.as_ref().map(|active| {
        let id = active.id;
        let on_close = {
            let dispatcher = board.dispatcher();
            Callback::from(move |_: MouseEvent| dispatcher.dispatch(NoticeAction::Dismiss(id)))
        };
        let shown = active.phase == Phase::Shown;
        html! {
            <div class={classes!("notification", active.notice.kind.class(), shown.then(|| "show"))}
                 role="status">
                <div class="notification-content">
                    <div class="notification-icon">{ icon(active.notice.kind) }</div>
                    <div class="notification-message">{ &active.notice.message }</div>
                    <button class="notification-close" aria-label="Close" onclick={on_close}>
                        <svg viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2">
                            <line x1="18" y1="6" x2="6" y2="18"></line>
                            <line x1="6" y1="6" x2="18" y2="18"></line>
                        </svg>
                    </button>
                </div>
            </div>
        }
    });

    html! {
        <ContextProvider<NotifyHandle> context={(*handle).clone()}>
            <style>
                {r#"
                    .notification {
                        position: fixed;
                        top: 20px;
                        right: 20px;
                        z-index: 10000;
                        max-width: 400px;
                        color: white;
                        border-radius: 12px;
                        box-shadow: 0 10px 25px rgba(0, 0, 0, 0.2);
                        transform: translateX(calc(100% + 40px));
                        transition: transform 0.3s ease;
                    }
                    .notification.show { transform: translateX(0); }
                    .notification-success { background: linear-gradient(135deg, #10b981, #059669); }
                    .notification-error { background: linear-gradient(135deg, #ef4444, #dc2626); }
                    .notification-warning { background: linear-gradient(135deg, #f59e0b, #d97706); }
                    .notification-info { background: linear-gradient(135deg, #3b82f6, #2563eb); }
                    .notification-content {
                        display: flex;
                        align-items: center;
                        gap: 12px;
                        padding: 16px 20px;
                    }
                    .notification-icon { width: 24px; height: 24px; flex-shrink: 0; }
                    .notification-message { flex: 1; font-size: 14px; line-height: 1.4; }
                    .notification-close {
                        background: none;
                        border: none;
                        color: white;
                        cursor: pointer;
                        width: 20px;
                        height: 20px;
                        padding: 0;
                        opacity: 0.7;
                    }
                    .notification-close:hover { opacity: 1; }
                "#}
            </style>
            { for props.children.iter() }
            { banner.unwrap_or_default() }
        </ContextProvider<NotifyHandle>>
    }
}

fn icon(kind: NoticeKind) -> Html {
    match kind {
        NoticeKind::Success => html! {
            <svg viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2">
                <polyline points="20,6 9,17 4,12"></polyline>
            </svg>
        },
        NoticeKind::Error => html! {
            <svg viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2">
                <circle cx="12" cy="12" r="10"></circle>
                <line x1="15" y1="9" x2="9" y2="15"></line>
                <line x1="9" y1="9" x2="15" y2="15"></line>
            </svg>
        },
        NoticeKind::Warning => html! {
            <svg viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2">
                <path d="m21.73 18-8-14a2 2 0 0 0-3.48 0l-8 14A2 2 0 0 0 4 21h16a2 2 0 0 0 1.73-3Z"></path>
                <line x1="12" y1="9" x2="12" y2="13"></line>
                <line x1="12" y1="17" x2="12.01" y2="17"></line>
            </svg>
        },
        NoticeKind::Info => html! {
            <svg viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2">
                <circle cx="12" cy="12" r="10"></circle>
                <line x1="12" y1="16" x2="12" y2="12"></line>
                <line x1="12" y1="8" x2="12.01" y2="8"></line>
            </svg>
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(notice: Notice) -> NoticeBoard {
        let mut board = NoticeBoard::default();
        board.apply(NoticeAction::Show(notice));
        board
    }

    #[test]
    fn show_starts_entering_with_default_duration() {
        let board = board_with(Notice::success("sent"));
        let active = board.current.expect("banner");
        assert_eq!(active.phase, Phase::Entering);
        assert_eq!(active.notice.duration_ms, DEFAULT_DURATION_MS);
    }

    #[test]
    fn new_notice_replaces_existing_one() {
        let mut board = board_with(Notice::info("first"));
        board.apply(NoticeAction::Show(Notice::error("second")));
        let active = board.current.as_ref().expect("banner");
        assert_eq!(active.notice.message, "second");
        assert_eq!(active.id, 2);
    }

    #[test]
    fn full_lifecycle_removes_banner() {
        let mut board = board_with(Notice::info("hello"));
        board.apply(NoticeAction::Reveal(1));
        assert_eq!(board.current.as_ref().map(|a| a.phase), Some(Phase::Shown));
        board.apply(NoticeAction::Dismiss(1));
        assert_eq!(board.current.as_ref().map(|a| a.phase), Some(Phase::Leaving));
        board.apply(NoticeAction::Remove(1));
        assert!(board.current.is_none());
    }

    #[test]
    fn stale_actions_do_not_touch_replacement() {
        let mut board = board_with(Notice::info("old"));
        board.apply(NoticeAction::Show(Notice::info("new")));
        board.apply(NoticeAction::Dismiss(1));
        board.apply(NoticeAction::Remove(1));
        let active = board.current.as_ref().expect("replacement survives");
        assert_eq!(active.notice.message, "new");
        assert_eq!(active.phase, Phase::Entering);
    }

    #[test]
    fn close_before_reveal_still_leaves() {
        let mut board = board_with(Notice::info("quick"));
        board.apply(NoticeAction::Dismiss(1));
        board.apply(NoticeAction::Reveal(1));
        assert_eq!(board.current.as_ref().map(|a| a.phase), Some(Phase::Leaving));
    }

    #[test]
    fn custom_duration_is_kept() {
        let notice = Notice::error("oops").with_duration(8000);
        assert_eq!(notice.duration_ms, 8000);
        assert_eq!(notice.kind, NoticeKind::Error);
    }
}
