use common::forms::{FieldErrors, RegisterForm, ORGANIZATION_TYPES};
use common::model::auth::AuthResponse;
use common::route::Route;
use log::debug;
use yew::platform::spawn_local;
use yew::prelude::*;

use super::{field_error, input_value, select_options, select_value, text_field, PageProps};
use crate::api::{auth, ApiError};
use crate::components::link::Link;
use crate::components::toast::{show_error, show_toast};
use crate::session;

pub enum Msg {
    Edit(fn(&mut RegisterForm, String), String),
    Submit,
    Finished(Result<AuthResponse, ApiError>),
}

pub struct RegisterPage {
    form: RegisterForm,
    errors: FieldErrors,
    submitting: bool,
}

impl Component for RegisterPage {
    type Message = Msg;
    type Properties = PageProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            form: RegisterForm::default(),
            errors: FieldErrors::default(),
            submitting: false,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Edit(set, value) => {
                set(&mut self.form, value);
                true
            }
            Msg::Submit => {
                if self.submitting {
                    return false;
                }
                let request = match self.form.validate() {
                    Ok(request) => request,
                    Err(errors) => {
                        self.errors = errors;
                        return true;
                    }
                };
                self.errors = FieldErrors::default();
                self.submitting = true;
                let api = ctx.props().app.api.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = auth::register(&api, &request).await;
                    link.send_message(Msg::Finished(result));
                });
                true
            }
            Msg::Finished(result) => {
                self.submitting = false;
                match result.and_then(session::establish) {
                    Ok(user) => {
                        show_toast("Account created successfully!");
                        ctx.props().app.on_signed_in.emit(user);
                    }
                    Err(err) => {
                        debug!("registration failed: {err}");
                        show_error(&err.message_or("Registration failed"));
                    }
                }
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let edit = |set: fn(&mut RegisterForm, String)| {
            link.callback(move |e: InputEvent| Msg::Edit(set, input_value(e)))
        };
        let onsubmit = link.callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::Submit
        });
        let on_type = link.callback(|e: Event| {
            Msg::Edit(|f, v| f.organization_type = v, select_value(e))
        });

        html! {
            <div class="auth-page">
                <div class="auth-card card">
                    <span class="material-icons auth-icon">{"badge"}</span>
                    <h2>{"Create your account"}</h2>
                    <p class="hint">
                        {"Or "}
                        <Link to={Route::Login} navigate={ctx.props().app.navigate.clone()}>
                            {"sign in to your existing account"}
                        </Link>
                    </p>
                    <form class="auth-form" {onsubmit} novalidate={true}>
                        { text_field("email", "Email address", "email", &self.form.email,
                            self.errors.get("email"), edit(|f, v| f.email = v)) }
                        { text_field("organization_name", "Organization Name", "text",
                            &self.form.organization_name, self.errors.get("organization_name"),
                            edit(|f, v| f.organization_name = v)) }
                        <div class="form-field">
                            <label for="organization_type">{"Organization Type"}</label>
                            <select id="organization_type" class="input" onchange={on_type}>
                                { select_options("Select organization type", &ORGANIZATION_TYPES,
                                    &self.form.organization_type) }
                            </select>
                            { field_error(self.errors.get("organization_type")) }
                        </div>
                        { text_field("password", "Password", "password", &self.form.password,
                            self.errors.get("password"), edit(|f, v| f.password = v)) }
                        { text_field("confirm_password", "Confirm Password", "password",
                            &self.form.confirm_password, self.errors.get("confirm_password"),
                            edit(|f, v| f.confirm_password = v)) }
                        <button type="submit" class="btn btn-primary btn-block" disabled={self.submitting}>
                            { if self.submitting { "Creating account..." } else { "Create account" } }
                        </button>
                    </form>
                </div>
            </div>
        }
    }
}
