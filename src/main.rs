//! Main module for the exam timer application using Yew.
//! Wires UI components, the exam timer hook and input validation.

use exam_timer::{presets, Command};
use std::rc::Rc;
use yew::prelude::*;

mod audio;
mod components;
mod config;
mod console_log;
mod hooks;
mod runtime;
mod utils;

use components::{
    ControlButtons, DurationInput, IntervalSelect, NotificationBanner, PresetSelect, SoundToggle,
    TimerDisplay,
};
use config::{APP_TITLE, LOG_LEVEL};
use hooks::{use_exam_timer, use_validated_input};
use utils::validate_duration;

/// Primary application component wiring state, effects, and UI elements.
#[function_component(App)]
fn app() -> Html {
    let exam = use_exam_timer();
    let dispatch = exam.dispatch.clone();

    let (config, state, elapsed_seconds, total_seconds, message) = {
        let timer = exam.timer();
        (
            timer.config().clone(),
            timer.state(),
            timer.elapsed_seconds(),
            timer.total_seconds(),
            timer
                .visible_notification(js_sys::Date::now())
                .map(|n| AttrValue::from(n.message.clone())),
        )
    };

    let parse_duration: Rc<dyn Fn(&str) -> Result<u32, String>> = Rc::new(validate_duration);
    let duration = use_validated_input(
        config.total_minutes,
        parse_duration,
        dispatch.reform(Command::SetTotalMinutes),
    );

    // Keep the duration field in step when a preset changes the total.
    {
        let set_value = duration.set_value.clone();
        use_effect_with(config.total_minutes, move |minutes| {
            set_value.emit(*minutes);
            || ()
        });
    }

    let on_toggle = dispatch.reform(|_: MouseEvent| Command::Toggle);
    let on_reset = dispatch.reform(|_: MouseEvent| Command::Reset);
    let on_interval = dispatch.reform(Command::SetAlertInterval);
    let on_preset = dispatch.reform(Command::SelectPreset);
    let on_sound = dispatch.reform(Command::SetSound);

    let container_class = classes!("container", message.is_some().then_some("alert-active"));

    html! {
        <div class={container_class}>
            <NotificationBanner message={message} />

            <header class="app-header">
                <h1>{ APP_TITLE }</h1>
            </header>

            <main class="glass-card">
                <TimerDisplay
                    remaining_seconds={state.remaining_seconds}
                    {elapsed_seconds}
                    {total_seconds}
                />

                <section class="controls-area">
                    <div class="settings-group">
                        <PresetSelect
                            presets={presets::list()}
                            selected={AttrValue::from(config.selected_preset.clone())}
                            disabled={state.running}
                            onchange={on_preset}
                        />
                        <DurationInput
                            text={AttrValue::from(duration.text.clone())}
                            error={duration.error.clone().map(AttrValue::from)}
                            disabled={state.running}
                            oninput={duration.on_text_input.clone()}
                            oncommit={duration.on_commit.clone()}
                        />
                        <IntervalSelect
                            value={config.alert_interval}
                            disabled={state.running}
                            onchange={on_interval}
                        />
                        <SoundToggle enabled={config.sound_enabled} onchange={on_sound} />
                    </div>

                    <ControlButtons running={state.running} {on_toggle} {on_reset} />
                </section>
            </main>
        </div>
    }
}

/// Entry point: installs logging and the panic hook, then renders the app.
fn main() {
    console_error_panic_hook::set_once();
    console_log::init(LOG_LEVEL);
    log::info!("Starting {}", APP_TITLE);
    yew::Renderer::<App>::new().render();
}
