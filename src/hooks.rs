use crate::runtime::Runtime;
use exam_timer::{Command, ExamTimer};
use log::warn;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Holds the state and callbacks for a validated input field.
#[derive(Clone)]
pub struct ValidatedInput<T: Clone + PartialEq + 'static> {
    /// The current text content of the input field.
    pub text: String,
    /// An optional error message if validation failed.
    pub error: Option<String>,
    /// Callback for the text input's `oninput` event. Updates the internal text state.
    pub on_text_input: Callback<InputEvent>,
    /// Parse and validate the current text; on success the value is passed to `on_valid`.
    pub on_commit: Callback<()>,
    /// Callback to programmatically set the value.
    /// This will also update the text representation and clear any errors.
    pub set_value: Callback<T>,
}

/// Custom hook to manage state for a validated input field.
#[hook]
pub fn use_validated_input<T: Clone + PartialEq + std::fmt::Display + 'static>(
    initial_value: T,
    parse_and_validate: Rc<dyn Fn(&str) -> Result<T, String>>,
    on_valid: Callback<T>,
) -> ValidatedInput<T> {
    let text_state_handle: UseStateHandle<String> = use_state(|| initial_value.to_string());
    let error_state_handle: UseStateHandle<Option<String>> = use_state(|| None::<String>);

    let on_text_input = {
        let text_setter = text_state_handle.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            text_setter.set(input.value());
        })
    };

    let on_commit = {
        let current_text_handle = text_state_handle.clone();
        let text_setter_on_commit = text_state_handle.clone();
        let error_setter = error_state_handle.clone();
        let parse_fn = parse_and_validate.clone();

        Callback::from(move |_: ()| match parse_fn(current_text_handle.as_str()) {
            Ok(parsed_val) => {
                text_setter_on_commit.set(parsed_val.to_string()); // canonical form
                error_setter.set(None);
                on_valid.emit(parsed_val);
            }
            Err(err_msg) => {
                error_setter.set(Some(err_msg));
            }
        })
    };

    let set_value = {
        let text_setter = text_state_handle.clone();
        let error_setter = error_state_handle.clone();
        Callback::from(move |new_val: T| {
            text_setter.set(new_val.to_string());
            error_setter.set(None); // Assume programmatic set is valid
        })
    };

    ValidatedInput {
        text: (*text_state_handle).clone(),
        error: (*error_state_handle).clone(),
        on_text_input,
        on_commit,
        set_value,
    }
}

/// Shared handles behind the exam timer hook.
#[derive(Clone)]
struct Dispatcher {
    timer: Rc<RefCell<ExamTimer>>,
    runtime: Rc<RefCell<Runtime>>,
    rerender: UseForceUpdateHandle,
}

impl Dispatcher {
    fn send(&self, command: Command) {
        let now_ms = js_sys::Date::now();
        let result = self.timer.borrow_mut().handle(command.clone(), now_ms);
        match result {
            Ok(effects) => {
                let dispatch = self.callback();
                let mut runtime = self.runtime.borrow_mut();
                for effect in effects {
                    runtime.apply(effect, &dispatch);
                }
            }
            Err(e) => warn!("Rejected {:?}: {}", command, e),
        }
        self.rerender.force_update();
    }

    fn callback(&self) -> Callback<Command> {
        let dispatcher = self.clone();
        Callback::from(move |command| dispatcher.send(command))
    }
}

/// Handle returned by [`use_exam_timer`].
#[derive(Clone)]
pub struct ExamTimerHandle {
    timer: Rc<RefCell<ExamTimer>>,
    pub dispatch: Callback<Command>,
}

impl ExamTimerHandle {
    /// Read access to the controller for rendering.
    pub fn timer(&self) -> std::cell::Ref<'_, ExamTimer> {
        self.timer.borrow()
    }
}

/// Owns the exam timer and its runtime for the lifetime of the component.
#[hook]
pub fn use_exam_timer() -> ExamTimerHandle {
    let timer = use_mut_ref(ExamTimer::default);
    let runtime = use_mut_ref(Runtime::default);
    let rerender = use_force_update();

    let dispatcher = Dispatcher {
        timer: timer.clone(),
        runtime: runtime.clone(),
        rerender,
    };

    // Tear down the ticker, expiry and audio on unmount.
    {
        let runtime = runtime.clone();
        use_effect_with((), move |_| move || runtime.borrow_mut().shutdown());
    }

    ExamTimerHandle {
        timer,
        dispatch: dispatcher.callback(),
    }
}
