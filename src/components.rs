//! Pure Yew view components for the exam timer UI.
//!
//! These components render from props only; all state lives in the
//! exam timer hook.

use crate::config::BELL;
use exam_timer::presets::Preset;
use exam_timer::{format_clock, progress_percent, AlertInterval};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

/// Remaining time and progress bar.
#[derive(Properties, PartialEq)]
pub struct TimerDisplayProps {
    pub remaining_seconds: u32,
    pub elapsed_seconds: u32,
    pub total_seconds: u32,
}

#[function_component(TimerDisplay)]
pub fn timer_display(props: &TimerDisplayProps) -> Html {
    let progress = progress_percent(props.elapsed_seconds, props.total_seconds);
    html! {
        <section class="timer-display">
            <div class="time-text">{ format_clock(props.remaining_seconds) }</div>
            <div class="progress-bar-container">
                <div class="progress-bar" style={format!("width: {:.2}%", progress)}></div>
            </div>
        </section>
    }
}

/// Transient banner; renders nothing without a message.
#[derive(Properties, PartialEq)]
pub struct NotificationBannerProps {
    pub message: Option<AttrValue>,
}

#[function_component(NotificationBanner)]
pub fn notification_banner(props: &NotificationBannerProps) -> Html {
    match &props.message {
        Some(message) => html! {
            <div class="notification-banner">{ format!("{} {}", BELL, message) }</div>
        },
        None => html! {},
    }
}

/// Exam duration in minutes, validated on commit.
#[derive(Properties, PartialEq)]
pub struct DurationInputProps {
    pub text: AttrValue,
    pub error: Option<AttrValue>,
    pub disabled: bool,
    pub oninput: Callback<InputEvent>,
    pub oncommit: Callback<()>,
}

#[function_component(DurationInput)]
pub fn duration_input(props: &DurationInputProps) -> Html {
    let onchange = props.oncommit.reform(|_: Event| ());
    let onkeydown = {
        let oncommit = props.oncommit.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                oncommit.emit(());
            }
        })
    };
    html! {
        <div class="input-group">
            <label for="duration">{ "시험 시간" }</label>
            <div class="input-wrapper">
                <input id="duration"
                    type="number"
                    min="1"
                    value={props.text.clone()}
                    disabled={props.disabled}
                    oninput={props.oninput.clone()}
                    {onchange}
                    {onkeydown}
                />
                <span>{ "분" }</span>
            </div>
            if let Some(err) = &props.error {
                <div class="input-error">{ err.clone() }</div>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct IntervalSelectProps {
    pub value: AlertInterval,
    pub disabled: bool,
    pub onchange: Callback<AlertInterval>,
}

#[function_component(IntervalSelect)]
pub fn interval_select(props: &IntervalSelectProps) -> Html {
    let filtered = props.onchange.filter_reform(|e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        select
            .value()
            .parse::<u32>()
            .ok()
            .and_then(|minutes| AlertInterval::try_from(minutes).ok())
    });
    let onchange = Callback::from(move |e: Event| {
        filtered.emit(e);
    });
    html! {
        <div class="input-group">
            <label for="interval">{ "알림 간격" }</label>
            <select id="interval" disabled={props.disabled} {onchange}>
                { for AlertInterval::ALL.iter().map(|interval| html! {
                    <option value={interval.minutes().to_string()}
                            selected={*interval == props.value}>
                        { format!("{}분 마다", interval.minutes()) }
                    </option>
                }) }
            </select>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct PresetSelectProps {
    pub presets: &'static [Preset],
    pub selected: AttrValue,
    pub disabled: bool,
    pub onchange: Callback<String>,
}

#[function_component(PresetSelect)]
pub fn preset_select(props: &PresetSelectProps) -> Html {
    let onchange = props.onchange.reform(|e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        select.value()
    });
    html! {
        <div class="input-group">
            <label for="preset">{ "시험 종류" }</label>
            <select id="preset" disabled={props.disabled} {onchange}>
                { for props.presets.iter().map(|preset| html! {
                    <option value={preset.name.clone()}
                            selected={preset.name == props.selected.as_str()}>
                        { preset.name.clone() }
                    </option>
                }) }
            </select>
        </div>
    }
}

/// Sound on/off; editable at any time.
#[derive(Properties, PartialEq)]
pub struct SoundToggleProps {
    pub enabled: bool,
    pub onchange: Callback<bool>,
}

#[function_component(SoundToggle)]
pub fn sound_toggle(props: &SoundToggleProps) -> Html {
    let onchange = props.onchange.reform(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        input.checked()
    });
    html! {
        <label class="sound-toggle">
            <input type="checkbox" checked={props.enabled} {onchange} />
            { "소리 알림" }
        </label>
    }
}

#[derive(Properties, PartialEq)]
pub struct ControlButtonsProps {
    pub running: bool,
    pub on_toggle: Callback<MouseEvent>,
    pub on_reset: Callback<MouseEvent>,
}

#[function_component(ControlButtons)]
pub fn control_buttons(props: &ControlButtonsProps) -> Html {
    let (class, label) = if props.running {
        ("btn-primary pause", "일시정지")
    } else {
        ("btn-primary start", "시작")
    };
    html! {
        <div class="button-group">
            <button {class} onclick={props.on_toggle.clone()}>{ label }</button>
            <button class="btn-secondary" onclick={props.on_reset.clone()}>{ "초기화" }</button>
        </div>
    }
}
