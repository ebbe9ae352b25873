use common::forms::{FieldErrors, LoginForm};
use common::model::auth::AuthResponse;
use common::route::Route;
use log::debug;
use yew::platform::spawn_local;
use yew::prelude::*;

use super::{input_value, text_field, PageProps};
use crate::api::{auth, ApiError};
use crate::components::link::Link;
use crate::components::toast::{show_error, show_toast};
use crate::session;

pub enum Msg {
    SetEmail(String),
    SetPassword(String),
    Submit,
    Finished(Result<AuthResponse, ApiError>),
}

pub struct LoginPage {
    form: LoginForm,
    errors: FieldErrors,
    submitting: bool,
}

impl Component for LoginPage {
    type Message = Msg;
    type Properties = PageProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            form: LoginForm::default(),
            errors: FieldErrors::default(),
            submitting: false,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SetEmail(email) => {
                self.form.email = email;
                true
            }
            Msg::SetPassword(password) => {
                self.form.password = password;
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
                    let result = auth::login(&api, &request).await;
                    link.send_message(Msg::Finished(result));
                });
                true
            }
            Msg::Finished(result) => {
                self.submitting = false;
                match result.and_then(session::establish) {
                    Ok(user) => {
                        show_toast("Logged in successfully!");
                        ctx.props().app.on_signed_in.emit(user);
                    }
                    Err(err) => {
                        debug!("login failed: {err}");
                        show_error(&err.message_or("Login failed"));
                    }
                }
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let onsubmit = link.callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::Submit
        });

        html! {
            <div class="auth-page">
                <div class="auth-card card">
                    <span class="material-icons auth-icon">{"badge"}</span>
                    <h2>{"Sign in to your account"}</h2>
                    <p class="hint">
                        {"Or "}
                        <Link to={Route::Register} navigate={ctx.props().app.navigate.clone()}>
                            {"create a new account"}
                        </Link>
                    </p>
                    <form class="auth-form" {onsubmit} novalidate={true}>
                        { text_field("email", "Email address", "email", &self.form.email,
                            self.errors.get("email"), link.callback(|e| Msg::SetEmail(input_value(e)))) }
                        { text_field("password", "Password", "password", &self.form.password,
                            self.errors.get("password"), link.callback(|e| Msg::SetPassword(input_value(e)))) }
                        <button type="submit" class="btn btn-primary btn-block" disabled={self.submitting}>
                            { if self.submitting { "Signing in..." } else { "Sign in" } }
                        </button>
                    </form>
                </div>
            </div>
        }
    }
}
