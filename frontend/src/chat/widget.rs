use gloo_timers::callback::Timeout;
use log::{error, info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Event, File, HtmlElement, HtmlInputElement, HtmlTextAreaElement, Node};
use yew::context::ContextHandle;
use yew::prelude::*;

use crate::chat::api::ChatClient;
use crate::chat::attachment::{read_image, validate_image, AttachmentError, ImageAttachment};
use crate::chat::error::ChatError;
use crate::chat::format::render_reply;
use crate::chat::history::Role;
use crate::chat::session::{ChatSession, EntryBody, SendRejected, TranscriptEntry};
use crate::components::notification::{Notice, NotifyHandle};
use crate::config::ChatSettings;
use crate::dom;

pub const MAX_INPUT_CHARS: usize = 500;
const MAX_INPUT_HEIGHT_PX: i32 = 80;
const FOCUS_DELAY_MS: u32 = 300;

const QUICK_QUESTIONS: &[(&str, &str)] = &[
    ("CPL requirements", "What are the DGCA requirements for a Commercial Pilot License?"),
    ("VOR basics", "Explain how VOR navigation works."),
    ("Reading a METAR", "How do I decode a METAR report?"),
    ("Exam tips", "How should I prepare for the DGCA Air Regulations exam?"),
];

/// Colour band of the character counter.
pub fn counter_tone(count: usize) -> &'static str {
    if count > 450 {
        "danger"
    } else if count > 400 {
        "warning"
    } else {
        "normal"
    }
}

fn truncate_chars(text: String, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => text[..cut].to_string(),
        None => text,
    }
}

#[derive(Properties, PartialEq)]
pub struct ChatWidgetProps {
    pub settings: ChatSettings,
}

pub enum Msg {
    Toggle,
    Close,
    ToggleMinimize,
    OutsideClick,
    Input(String),
    Send,
    Quick(&'static str),
    PickImage,
    ImagePicked(File),
    ImageLoaded(Result<ImageAttachment, AttachmentError>),
    RemoveImage,
    Reply(Result<String, ChatError>),
}

/// Floating "Captain AI" assistant.
pub struct ChatWidget {
    client: ChatClient,
    session: ChatSession,
    input: String,
    open: bool,
    minimized: bool,
    unread: bool,
    notify: Option<NotifyHandle>,
    _notify_ctx: Option<ContextHandle<NotifyHandle>>,
    focus_timer: Option<Timeout>,
    outside_click: Option<Closure<dyn FnMut(Event)>>,
    toggle_ref: NodeRef,
    popup_ref: NodeRef,
    messages_ref: NodeRef,
    input_ref: NodeRef,
    file_ref: NodeRef,
}

impl ChatWidget {
    fn notify(&self, notice: Notice) {
        match &self.notify {
            Some(handle) => handle.show(notice),
            None => warn!("chat widget has no notification host: {}", notice.message),
        }
    }

    fn clear_file_input(&self) {
        if let Some(input) = self.file_ref.cast::<HtmlInputElement>() {
            input.set_value("");
        }
    }

    fn schedule_focus(&mut self) {
        let input = self.input_ref.clone();
        self.focus_timer = Some(Timeout::new(FOCUS_DELAY_MS, move || {
            if let Some(el) = input.cast::<HtmlTextAreaElement>() {
                let _ = el.focus();
            }
        }));
    }

    fn listen_outside_clicks(&mut self, ctx: &Context<Self>) -> Result<(), dom::BindError> {
        let document = dom::document()?;
        let link = ctx.link().clone();
        let owners = [self.popup_ref.clone(), self.toggle_ref.clone()];
        // The event path is fixed at dispatch time, so a button that a
        // re-render has already detached still counts as inside.
        let closure = Closure::wrap(Box::new(move |e: Event| {
            let path = e.composed_path();
            let inside = owners
                .iter()
                .filter_map(|owner| owner.cast::<Node>())
                .any(|owner| path.includes(owner.as_ref(), 0));
            if !inside {
                link.send_message(Msg::OutsideClick);
            }
        }) as Box<dyn FnMut(Event)>);
        if let Err(e) =
            document.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
        {
            error!("could not listen for outside clicks: {:?}", e);
        }
        self.outside_click = Some(closure);
        Ok(())
    }

    fn resize_input(&self) {
        let Ok(textarea) = dom::require::<HtmlElement>(&self.input_ref, "chat input") else {
            return;
        };
        let style = textarea.style();
        let _ = style.set_property("height", "auto");
        let height = textarea.scroll_height().min(MAX_INPUT_HEIGHT_PX);
        let _ = style.set_property("height", &format!("{}px", height));
    }

    fn scroll_to_bottom(&self) {
        if let Some(list) = self.messages_ref.cast::<HtmlElement>() {
            list.set_scroll_top(list.scroll_height());
        }
    }

    fn view_entry(&self, entry: &TranscriptEntry) -> Html {
        let (side, icon) = match entry.role {
            Role::User => ("user-message", "fas fa-user"),
            Role::Assistant => ("ai-message", "fas fa-plane"),
        };
        let body = match &entry.body {
            EntryBody::Text(text) => render_reply(text),
            EntryBody::Error(err) => html! { { err.user_message() } },
        };
        let image = entry.image.as_ref().map(|image| {
            let url = image.data_url.clone();
            let open_full = Callback::from(move |_: MouseEvent| {
                if let Some(window) = web_sys::window() {
                    let _ = window.open_with_url_and_target(&url, "_blank");
                }
            });
            let alt = if image.name.is_empty() { "Uploaded image".to_string() } else { image.name.clone() };
            html! {
                <div class="message-image">
                    <img src={image.data_url.clone()} {alt} onclick={open_full} />
                </div>
            }
        });

        html! {
            <div key={entry.id} class={classes!("message", side, entry.is_error().then(|| "failed-message"))}>
                <div class="message-avatar"><i class={icon}></i></div>
                <div class="message-content">
                    { body }
                    { image.unwrap_or_default() }
                    <span class="message-time">{ entry.sent_at.format("%H:%M").to_string() }</span>
                </div>
            </div>
        }
    }
}

impl Component for ChatWidget {
    type Message = Msg;
    type Properties = ChatWidgetProps;

    fn create(ctx: &Context<Self>) -> Self {
        let (notify, notify_ctx) = match ctx.link().context::<NotifyHandle>(Callback::noop()) {
            Some((handle, listener)) => (Some(handle), Some(listener)),
            None => (None, None),
        };

        Self {
            client: ChatClient::new(ctx.props().settings.clone()),
            session: ChatSession::with_welcome(),
            input: String::new(),
            open: false,
            minimized: false,
            unread: false,
            notify,
            _notify_ctx: notify_ctx,
            focus_timer: None,
            outside_click: None,
            toggle_ref: NodeRef::default(),
            popup_ref: NodeRef::default(),
            messages_ref: NodeRef::default(),
            input_ref: NodeRef::default(),
            file_ref: NodeRef::default(),
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, _old_props: &Self::Properties) -> bool {
        self.client = ChatClient::new(ctx.props().settings.clone());
        false
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Toggle => {
                if self.open {
                    ctx.link().send_message(Msg::Close);
                    false
                } else {
                    self.open = true;
                    self.unread = false;
                    self.schedule_focus();
                    true
                }
            }
            Msg::Close => {
                self.open = false;
                self.minimized = false;
                self.focus_timer = None;
                true
            }
            Msg::ToggleMinimize => {
                self.minimized = !self.minimized;
                true
            }
            Msg::OutsideClick => {
                if self.open {
                    ctx.link().send_message(Msg::Close);
                }
                false
            }
            Msg::Input(value) => {
                self.input = truncate_chars(value, MAX_INPUT_CHARS);
                true
            }
            Msg::Quick(question) => {
                self.input = question.to_string();
                ctx.link().send_message(Msg::Send);
                true
            }
            Msg::Send => match self.session.begin_send(&self.input) {
                Ok(outgoing) => {
                    self.input.clear();
                    self.clear_file_input();
                    let client = self.client.clone();
                    ctx.link()
                        .send_future(async move { Msg::Reply(client.complete(outgoing.window).await) });
                    true
                }
                Err(SendRejected::Busy) => {
                    info!("ignoring send while a reply is pending");
                    false
                }
                Err(SendRejected::Empty) => false,
            },
            Msg::Reply(result) => {
                if let Err(err) = &result {
                    error!("AI response error: {}", err);
                }
                self.session.complete(result);
                if !self.open || self.minimized {
                    self.unread = true;
                }
                true
            }
            Msg::PickImage => {
                if let Some(input) = self.file_ref.cast::<HtmlInputElement>() {
                    input.click();
                }
                false
            }
            Msg::ImagePicked(file) => {
                // Type and size are checked before any bytes are read.
                if let Err(err) = validate_image(&file.type_(), file.size() as u64) {
                    self.clear_file_input();
                    self.notify(Notice::error(err.to_string()));
                    return false;
                }
                ctx.link().send_future(async move { Msg::ImageLoaded(read_image(file).await) });
                false
            }
            Msg::ImageLoaded(Ok(image)) => {
                info!("attached {} ({} bytes)", image.name, image.size);
                self.session.attach(image);
                true
            }
            Msg::ImageLoaded(Err(err)) => {
                self.clear_file_input();
                self.notify(Notice::error(err.to_string()));
                false
            }
            Msg::RemoveImage => {
                self.session.remove_image();
                self.clear_file_input();
                true
            }
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render {
            if let Err(e) = self.listen_outside_clicks(ctx) {
                error!("chat widget: {}", e);
            }
        }
        self.resize_input();
        self.scroll_to_bottom();
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        if let (Some(closure), Ok(document)) = (self.outside_click.take(), dom::document()) {
            let _ = document
                .remove_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let count = self.input.chars().count();
        let can_send = self.session.can_send(&self.input);

        let on_input = link.callback(|e: InputEvent| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            Msg::Input(area.value())
        });
        let on_keydown = link.batch_callback(|e: KeyboardEvent| {
            if e.key() == "Enter" && !e.shift_key() {
                e.prevent_default();
                Some(Msg::Send)
            } else {
                None
            }
        });
        let on_file = link.batch_callback(|e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            input.files().and_then(|files| files.get(0)).map(Msg::ImagePicked)
        });

        let preview = self.session.pending_image().map(|image| html! {
            <div class="image-preview">
                <img src={image.data_url.clone()} alt={image.name.clone()} />
                <button class="remove-image" aria-label="Remove image"
                        onclick={link.callback(|_| Msg::RemoveImage)}>{"✕"}</button>
            </div>
        });

        html! {
            <div class="chatbot">
                <style>{CHAT_STYLES}</style>
                <button ref={self.toggle_ref.clone()} class="chatbot-toggle" aria-label="Open chat"
                        style={if self.open { "display: none;" } else { "display: flex;" }}
                        onclick={link.callback(|_| Msg::Toggle)}>
                    <i class="fas fa-comments"></i>
                    if self.unread {
                        <span class="chat-notification">{"1"}</span>
                    }
                </button>
                <div ref={self.popup_ref.clone()}
                     class={classes!("chatbot-popup", self.open.then(|| "show"), self.minimized.then(|| "minimized"))}>
                    <div class="chatbot-header">
                        <div class="chatbot-title">
                            <i class="fas fa-plane"></i>
                            <span>{"Captain AI"}</span>
                        </div>
                        <div class="chatbot-controls">
                            <button aria-label="Minimize" onclick={link.callback(|_| Msg::ToggleMinimize)}>
                                { if self.minimized { "▢" } else { "–" } }
                            </button>
                            <button aria-label="Close" onclick={link.callback(|_| Msg::Close)}>{"✕"}</button>
                        </div>
                    </div>
                    <div class="chat-messages" ref={self.messages_ref.clone()}>
                        { for self.session.transcript().iter().map(|entry| self.view_entry(entry)) }
                        if self.session.is_busy() {
                            <div class="message ai-message typing-indicator">
                                <div class="message-avatar"><i class="fas fa-plane"></i></div>
                                <div class="message-content">
                                    <div class="typing-dots">
                                        <div class="typing-dot"></div>
                                        <div class="typing-dot"></div>
                                        <div class="typing-dot"></div>
                                    </div>
                                </div>
                            </div>
                        }
                    </div>
                    <div class="quick-questions">
                        { for QUICK_QUESTIONS.iter().map(|(label, question)| {
                            let question: &'static str = *question;
                            html! {
                                <button class="quick-btn" data-question={question}
                                        disabled={self.session.is_busy()}
                                        onclick={link.callback(move |_| Msg::Quick(question))}>
                                    { *label }
                                </button>
                            }
                        }) }
                    </div>
                    { preview.unwrap_or_default() }
                    <div class="chat-input-area">
                        <button class="attach-btn" aria-label="Attach image"
                                onclick={link.callback(|_| Msg::PickImage)}>
                            <i class="fas fa-paperclip"></i>
                        </button>
                        <input ref={self.file_ref.clone()} type="file" accept="image/*"
                               style="display: none;" onchange={on_file} />
                        <textarea ref={self.input_ref.clone()} rows="1"
                                  placeholder="Ask Captain AI about your training..."
                                  maxlength={MAX_INPUT_CHARS.to_string()}
                                  value={self.input.clone()}
                                  oninput={on_input} onkeydown={on_keydown} />
                        <button class="send-btn" aria-label="Send" disabled={!can_send}
                                onclick={link.callback(|_| Msg::Send)}>
                            <i class="fas fa-paper-plane"></i>
                        </button>
                    </div>
                    <div class={classes!("character-count", counter_tone(count))}>
                        { format!("{}/{}", count, MAX_INPUT_CHARS) }
                    </div>
                </div>
            </div>
        }
    }
}

const CHAT_STYLES: &str = r#"
    .chatbot-toggle {
        position: fixed;
        bottom: 100px;
        right: 30px;
        width: 60px;
        height: 60px;
        border-radius: 50%;
        border: none;
        background: linear-gradient(135deg, #1e3a8a, #3b82f6);
        color: white;
        font-size: 24px;
        cursor: pointer;
        z-index: 1001;
        display: flex;
        align-items: center;
        justify-content: center;
    }
    .chat-notification {
        position: absolute;
        top: -4px;
        right: -4px;
        background: #ef4444;
        border-radius: 50%;
        width: 20px;
        height: 20px;
        font-size: 12px;
        display: flex;
        align-items: center;
        justify-content: center;
    }
    .chatbot-popup {
        position: fixed;
        bottom: 30px;
        right: 30px;
        width: 380px;
        max-width: calc(100vw - 40px);
        height: 560px;
        display: none;
        flex-direction: column;
        background: rgba(15, 23, 42, 0.95);
        backdrop-filter: blur(20px);
        border: 1px solid rgba(255, 255, 255, 0.15);
        border-radius: 20px;
        color: white;
        z-index: 1002;
        overflow: hidden;
    }
    .chatbot-popup.show { display: flex; }
    .chatbot-popup.minimized { height: 60px; }
    .chatbot-popup.minimized > :not(.chatbot-header) { display: none; }
    .chatbot-header {
        display: flex;
        justify-content: space-between;
        align-items: center;
        padding: 16px;
        background: rgba(30, 58, 138, 0.8);
    }
    .chatbot-controls button {
        background: none;
        border: none;
        color: white;
        cursor: pointer;
        font-size: 16px;
    }
    .chat-messages { flex: 1; overflow-y: auto; padding: 16px; }
    .message { display: flex; gap: 8px; margin-bottom: 12px; }
    .user-message { flex-direction: row-reverse; }
    .message-content {
        background: rgba(255, 255, 255, 0.08);
        border-radius: 12px;
        padding: 10px 12px;
        font-size: 14px;
        line-height: 1.5;
        max-width: 80%;
    }
    .user-message .message-content { background: rgba(59, 130, 246, 0.35); }
    .failed-message .message-content { border: 1px solid rgba(239, 68, 68, 0.6); }
    .message-image img { max-width: 100%; border-radius: 8px; margin-top: 8px; cursor: pointer; }
    .message-time { display: block; font-size: 10px; opacity: 0.5; margin-top: 4px; }
    .typing-dots { display: flex; gap: 4px; }
    .typing-dot {
        width: 6px;
        height: 6px;
        border-radius: 50%;
        background: white;
        animation: typing 1.2s infinite ease-in-out;
    }
    .typing-dot:nth-child(2) { animation-delay: 0.2s; }
    .typing-dot:nth-child(3) { animation-delay: 0.4s; }
    @keyframes typing {
        0%, 80%, 100% { opacity: 0.3; transform: translateY(0); }
        40% { opacity: 1; transform: translateY(-4px); }
    }
    .quick-questions { display: flex; flex-wrap: wrap; gap: 6px; padding: 0 16px 8px; }
    .quick-btn {
        background: rgba(255, 255, 255, 0.1);
        border: 1px solid rgba(255, 255, 255, 0.2);
        border-radius: 12px;
        color: white;
        font-size: 12px;
        padding: 4px 10px;
        cursor: pointer;
    }
    .image-preview { position: relative; padding: 0 16px 8px; }
    .image-preview img { max-height: 80px; border-radius: 8px; }
    .remove-image {
        position: absolute;
        top: -6px;
        left: 8px;
        border: none;
        border-radius: 50%;
        background: #ef4444;
        color: white;
        cursor: pointer;
    }
    .chat-input-area { display: flex; gap: 8px; align-items: flex-end; padding: 8px 16px; }
    .chat-input-area textarea {
        flex: 1;
        resize: none;
        max-height: 80px;
        background: rgba(255, 255, 255, 0.08);
        border: 1px solid rgba(255, 255, 255, 0.2);
        border-radius: 12px;
        color: white;
        padding: 8px 12px;
    }
    .send-btn, .attach-btn {
        background: none;
        border: none;
        color: white;
        font-size: 18px;
        cursor: pointer;
    }
    .send-btn:disabled { opacity: 0.4; cursor: not-allowed; }
    .character-count { text-align: right; font-size: 11px; padding: 0 16px 10px; }
    .character-count.normal { color: rgba(255, 255, 255, 0.5); }
    .character-count.warning { color: #ffa500; }
    .character-count.danger { color: #ff6b6b; }
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_tone_thresholds() {
        assert_eq!(counter_tone(0), "normal");
        assert_eq!(counter_tone(400), "normal");
        assert_eq!(counter_tone(401), "warning");
        assert_eq!(counter_tone(450), "warning");
        assert_eq!(counter_tone(451), "danger");
    }

    #[test]
    fn input_is_capped_on_char_boundaries() {
        let long = "✈".repeat(MAX_INPUT_CHARS + 20);
        let capped = truncate_chars(long, MAX_INPUT_CHARS);
        assert_eq!(capped.chars().count(), MAX_INPUT_CHARS);
        assert_eq!(truncate_chars("short".into(), MAX_INPUT_CHARS), "short");
    }
}
