//! Subcommand handlers
//!
//! Each handler drives the client the same way a page would: refresh the
//! session, load a page or submit a form, then print the rows.

use anyhow::{anyhow, bail, Result};
use chrono::Utc;
use clap::Subcommand;
use tracing::debug;
use vivopass_client::{
    AdminReportPage, BrowseEventsPage, FormSubmitter, ForumThreadsPage, MyBookingsPage,
    MyEventsPage, MyForumsPage, MyServicesPage, PageView, PaymentMethodsPage, SessionService,
    SubmitOutcome,
};
use vivopass_core::model::BookingStatus;
use vivopass_core::validation::{
    CommentForm, ForumForm, LoginForm, PasswordResetForm, PaymentMethodForm, SignupForm,
};
use vivopass_core::views::{filter_by_text, forums_for_event, report_totals};
use vivopass_core::ErrorKind;

use crate::render;

/// A failure the user has already been notified about
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct Reported(pub String);

#[derive(Subcommand)]
pub enum Command {
    /// Log in and remember the session
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },

    /// Create an account
    Signup {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(short, long)]
        email: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(short, long)]
        password: String,
        /// Defaults to the password
        #[arg(long)]
        confirm: Option<String>,
        #[arg(long)]
        role_id: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Ask for a password reset email
    ResetPassword {
        #[arg(short, long)]
        email: String,
    },

    /// List upcoming events, or the ones you organize
    Events {
        #[arg(long)]
        mine: bool,
        #[arg(short, long, default_value = "")]
        search: String,
    },

    /// List venues
    Venues {
        #[arg(short, long, default_value = "")]
        search: String,
    },

    /// List forums under your events, or under one event
    Forums {
        #[arg(long)]
        event: Option<String>,
        #[arg(short, long, default_value = "")]
        search: String,
    },

    /// Open a forum on an event
    ForumCreate {
        #[arg(long)]
        event: String,
        #[arg(short, long)]
        title: String,
        #[arg(short, long)]
        description: String,
    },

    /// Edit a forum you created
    ForumEdit {
        id: String,
        #[arg(short, long)]
        title: String,
        #[arg(short, long)]
        description: String,
    },

    /// Show the threads of a forum
    Comments { forum: String },

    /// Post a comment, or reply to one
    Comment {
        forum: String,
        content: String,
        #[arg(long)]
        reply_to: Option<String>,
    },

    /// Your ticket bookings
    Bookings {
        /// confirmed, pending or cancelled
        #[arg(long)]
        status: Option<String>,
        #[arg(short, long, default_value = "")]
        search: String,
    },

    /// Your complementary service bookings
    Services,

    /// Your registered cards
    PaymentMethods,

    /// Register a card
    AddCard {
        #[arg(long, default_value = "Tarjeta")]
        kind: String,
        #[arg(long)]
        holder: String,
        #[arg(long)]
        number: String,
        /// MM/YY
        #[arg(long)]
        expiry: String,
        #[arg(long)]
        cvv: String,
    },

    /// Sales per event (administrators)
    Report,
}

pub async fn run(command: Command, session: &SessionService) -> Result<()> {
    match command {
        Command::Login { email, password } => {
            let success = submitted(
                FormSubmitter::new(session)
                    .login(&LoginForm::new(email, password))
                    .await,
            )?;
            debug!("Redirect to {}", success.redirect.0);
            match success.user {
                Some(user) => println!("{}", render::user(&user, None)),
                None => println!("Logged in as user {}", success.user_id),
            }
        }
        Command::Signup {
            first_name,
            last_name,
            email,
            phone,
            password,
            confirm,
            role_id,
        } => {
            let form = SignupForm {
                first_name,
                last_name,
                email,
                phone,
                password_confirmation: confirm.unwrap_or_else(|| password.clone()),
                password,
                role_id,
            };
            submitted(FormSubmitter::new(session).signup(&form).await)?;
            println!("Next: vivopass login --email {}", form.email);
        }
        Command::Logout => session.logout().await?,
        Command::Whoami => {
            let user = session
                .refresh()
                .await
                .ok_or_else(|| Reported(ErrorKind::MissingSession.message().to_string()))?;
            let expires_at = session.stored().await?.and_then(|s| s.expires_at());
            println!("{}", render::user(&user, expires_at));
        }
        Command::ResetPassword { email } => {
            let message = submitted(
                FormSubmitter::new(session)
                    .request_password_reset(&PasswordResetForm { email })
                    .await,
            )?;
            debug!("Password reset acknowledged: {}", message);
        }
        Command::Events { mine, search } => {
            session.refresh().await;
            let now = Utc::now();
            let rows = if mine {
                let mut page = MyEventsPage::new().with_query(search);
                page.load(session).await;
                rows(page.view())?
            } else {
                let mut page = BrowseEventsPage::new();
                page.query = search;
                page.load(session).await;
                rows(page.view(now))?
            };
            rows.iter().for_each(|e| println!("{}", render::event(e)));
        }
        Command::Venues { search } => {
            let (token, _) = session.credentials().await?;
            let venues = session.client().list_venues(&token).await?;
            filter_by_text(venues, &search, |v| v.name.as_str())
                .iter()
                .filter(|v| v.active)
                .for_each(|v| println!("{}", render::venue(v)));
        }
        Command::Forums { event: Some(event), search } => {
            let (token, _) = session.credentials().await?;
            let forums = session.client().list_forums(&token).await?;
            let forums =
                filter_by_text(forums_for_event(&forums, &event), &search, |f| f.title.as_str());
            forums.iter().for_each(|f| println!("{}", render::forum(f)));
        }
        Command::Forums { event: None, search } => {
            session.refresh().await;
            let mut page = MyForumsPage::new().with_query(search);
            page.load(session).await;
            rows(page.view())?
                .iter()
                .for_each(|f| println!("{}", render::forum(f)));
        }
        Command::ForumCreate {
            event,
            title,
            description,
        } => {
            let form = ForumForm {
                event_id: event,
                title,
                description,
            };
            let forum = submitted(FormSubmitter::new(session).create_forum(&form).await)?;
            println!("{}", render::forum(&forum));
        }
        Command::ForumEdit {
            id,
            title,
            description,
        } => {
            session.refresh().await;
            let (token, _) = session.credentials().await?;
            let forum = session
                .client()
                .list_forums(&token)
                .await?
                .into_iter()
                .find(|f| f.id == id)
                .ok_or_else(|| anyhow!(ErrorKind::NotFound.message()))?;
            let form = ForumForm {
                event_id: forum.event_id.clone(),
                title,
                description,
            };
            let forum = submitted(FormSubmitter::new(session).update_forum(&forum, &form).await)?;
            println!("{}", render::forum(&forum));
        }
        Command::Comments { forum } => {
            session.refresh().await;
            let mut page = ForumThreadsPage::new(&forum);
            page.load(session).await;
            for thread in rows(page.view())? {
                render::thread(&thread).iter().for_each(|l| println!("{}", l));
            }
        }
        Command::Comment {
            forum,
            content,
            reply_to,
        } => {
            let mut form = CommentForm::thread(forum, content);
            if let Some(parent) = reply_to {
                form = form.reply(parent);
            }
            let comment = submitted(FormSubmitter::new(session).create_comment(&form).await)?;
            println!("Posted comment {}", comment.id);
        }
        Command::Bookings { status, search } => {
            let status = status
                .as_deref()
                .map(BookingStatus::parse_filter)
                .transpose()?;
            session.refresh().await;
            let mut page = MyBookingsPage::new();
            page.status = status;
            page.query = search;
            page.load(session).await;
            rows(page.view())?
                .iter()
                .for_each(|b| println!("{}", render::booking(b)));
        }
        Command::Services => {
            session.refresh().await;
            let mut page = MyServicesPage::new();
            page.load(session).await;
            rows(page.view(Utc::now()))?
                .iter()
                .for_each(|s| println!("{}", render::service(s)));
        }
        Command::PaymentMethods => {
            session.refresh().await;
            let mut page = PaymentMethodsPage::new();
            page.load(session).await;
            rows(page.view())?
                .iter()
                .for_each(|m| println!("{}", render::payment_method(m)));
        }
        Command::AddCard {
            kind,
            holder,
            number,
            expiry,
            cvv,
        } => {
            let form = PaymentMethodForm {
                kind,
                holder,
                card_number: number,
                expiry,
                cvv,
            };
            let method = submitted(FormSubmitter::new(session).add_payment_method(&form).await)?;
            println!("{}", render::payment_method(&method));
        }
        Command::Report => {
            session.refresh().await;
            let mut page = AdminReportPage::new();
            page.load(session).await;
            let rows = rows(page.view())?;
            let totals = report_totals(&rows);
            render::report(&rows, &totals)
                .iter()
                .for_each(|l| println!("{}", l));
        }
    }
    Ok(())
}

fn submitted<T>(outcome: SubmitOutcome<T>) -> Result<T> {
    match outcome {
        SubmitOutcome::Success(value) => Ok(value),
        SubmitOutcome::Invalid(errors) => bail!("{}", errors),
        SubmitOutcome::Failed(e) => Err(Reported(e.message.to_string()).into()),
    }
}

fn rows<T>(view: PageView<T>) -> Result<Vec<T>> {
    match view {
        PageView::Rows(rows) => Ok(rows),
        PageView::Empty => {
            eprintln!("Nothing to show.");
            Ok(Vec::new())
        }
        PageView::Loading => Ok(Vec::new()),
        PageView::SignedOut => bail!(ErrorKind::MissingSession.message()),
        PageView::AccessDenied => bail!(ErrorKind::AccessDenied.message()),
        PageView::Failed(e) => bail!(e.message),
    }
}
