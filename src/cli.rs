use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use inquire::{Confirm, Password, Text};

use crate::clients::backend::BackendClient;
use crate::config::AppConfig;
use crate::models::animal::{LifeStage, Sex};
use crate::models::stats::StatsPeriod;
use crate::models::user::{Credentials, Role};
use crate::service::animal_search::AnimalFilter;
use crate::service::notify::{Notification, NotificationSink, TerminalNotifier};
use crate::service::schedule::DateFilter;
use crate::session::Session;
use crate::surfaces::adoptions::{AdoptionForm, AdoptionsSurface};
use crate::surfaces::animals::AnimalsSurface;
use crate::surfaces::appointments::{AdopterForm, AppointmentForm, AppointmentsSurface};
use crate::surfaces::stats::StatsSurface;
use crate::surfaces::users::{CreateUserSurface, NewUserForm};

#[derive(Parser)]
#[command(name = "pawshelt", about = "Consola de administración del refugio Pawshelt")]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Iniciar sesión y guardar el token
    Login {
        #[arg(long)]
        email: Option<String>,
    },
    /// Cerrar sesión (borra el token guardado)
    Logout,
    /// Listado de animales con búsqueda y filtros
    Animals {
        #[arg(long)]
        search: Option<String>,
        #[arg(long, value_parser = parse_sex)]
        sex: Option<Sex>,
        #[arg(long, value_parser = parse_stage)]
        stage: Option<LifeStage>,
        #[arg(long)]
        species: Option<String>,
    },
    /// Gestión de citas
    #[command(subcommand)]
    Citas(CitaCommands),
    /// Gestión de adoptantes
    #[command(subcommand)]
    Adoptantes(AdopterCommands),
    /// Gestión de adopciones
    #[command(subcommand)]
    Adopciones(AdoptionCommands),
    /// Registrar una cuenta de personal (solo ADMIN)
    CreateUser {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, value_parser = parse_role, default_value = "trabajador")]
        role: Role,
    },
    /// Estadísticas agregadas
    Stats {
        #[arg(long, value_parser = parse_period, default_value = "mes")]
        period: StatsPeriod,
    },
}

#[derive(Subcommand)]
enum CitaCommands {
    List {
        #[arg(long)]
        day: Option<u32>,
        #[arg(long)]
        month: Option<u32>,
        #[arg(long)]
        year: Option<i32>,
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Sin filtro de fecha (por defecto se filtra por hoy)
        #[arg(long)]
        all: bool,
    },
    Create {
        #[arg(long)]
        adopter_id: i64,
        #[arg(long)]
        description: String,
        #[arg(long, value_parser = parse_datetime)]
        start: NaiveDateTime,
        #[arg(long, value_parser = parse_datetime)]
        end: NaiveDateTime,
    },
    Update {
        id: i64,
        #[arg(long)]
        adopter_id: i64,
        #[arg(long)]
        description: String,
        #[arg(long, value_parser = parse_datetime)]
        start: NaiveDateTime,
        #[arg(long, value_parser = parse_datetime)]
        end: NaiveDateTime,
    },
    /// Mover una cita conservando título, descripción y adoptante
    Move {
        id: i64,
        #[arg(long, value_parser = parse_datetime)]
        start: NaiveDateTime,
        #[arg(long, value_parser = parse_datetime)]
        end: NaiveDateTime,
    },
    Delete {
        id: i64,
    },
}

#[derive(Subcommand)]
enum AdopterCommands {
    List {
        #[arg(long)]
        search: Option<String>,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        address: String,
    },
}

#[derive(Subcommand)]
enum AdoptionCommands {
    List,
    Create {
        #[arg(long)]
        animal_id: i64,
        #[arg(long)]
        adopter_id: i64,
        #[arg(long, value_parser = parse_date)]
        date: NaiveDate,
        #[arg(long, default_value = "")]
        notes: String,
    },
}

pub async fn run(config: AppConfig) -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let api_url = config.api_url()?;
    let session_path = config.session_file();
    let min_loader = config.min_loader();
    let sink: Arc<dyn NotificationSink> = Arc::new(TerminalNotifier);

    match cli.command {
        Commands::Login { email } => {
            login(&api_url, &session_path, sink, email).await?;
        }
        Commands::Logout => {
            Session::clear(&session_path)?;
            println!("Sesión cerrada.");
        }
        command => {
            let session = Session::load(&session_path)?;
            let token = session.as_ref().map(|s| s.token.clone());
            if token.is_none() {
                sink.show(&Notification::error(
                    "Error",
                    "No hay token. Inicia sesión de nuevo.",
                ));
                return Ok(());
            }
            let client = BackendClient::new(&api_url, token);
            dispatch(command, client, sink, min_loader).await?;
        }
    }
    Ok(())
}

async fn login(
    api_url: &str,
    session_path: &std::path::Path,
    sink: Arc<dyn NotificationSink>,
    email: Option<String>,
) -> Result<(), Box<dyn Error>> {
    let email = match email {
        Some(value) => value,
        None => Text::new("Usuario").prompt()?,
    };
    let password = Password::new("Contraseña")
        .without_confirmation()
        .prompt()?;
    if email.trim().is_empty() || password.is_empty() {
        sink.show(&Notification::error(
            "Error",
            "Por favor, completa todos los campos.",
        ));
        return Ok(());
    }
    let client = BackendClient::new(api_url, None);
    let response = client.login(&Credentials { email, password }).await?;
    let session = Session {
        token: response.token,
        user: response.user,
    };
    session.store(session_path)?;
    sink.show(&Notification::success(
        "¡Login exitoso!",
        &format!(
            "Bienvenido, {} ({})",
            session.user.name,
            session.user.role.label()
        ),
    ));
    Ok(())
}

async fn dispatch(
    command: Commands,
    client: BackendClient,
    sink: Arc<dyn NotificationSink>,
    min_loader: Duration,
) -> Result<(), Box<dyn Error>> {
    let today = Local::now().date_naive();
    let now = Local::now().naive_local();

    match command {
        Commands::Login { .. } | Commands::Logout => unreachable!("handled before dispatch"),

        Commands::Animals {
            search,
            sex,
            stage,
            species,
        } => {
            let mut surface = AnimalsSurface::new(client, sink);
            surface.refresh().await?;
            surface.set_filter(AnimalFilter {
                text: search.unwrap_or_default(),
                sex,
                life_stage: stage,
                species,
            });
            for animal in surface.visible() {
                println!(
                    "#{:<4} {:<20} {:<12} {:<8} {:<10} {}",
                    animal.id,
                    animal.name,
                    animal.species,
                    animal.sex.label(),
                    animal.life_stage().label(),
                    animal.status.label(),
                );
            }
        }

        Commands::Citas(command) => {
            let mut surface = AppointmentsSurface::new(client, sink, min_loader, today);
            surface.refresh().await?;
            match command {
                CitaCommands::List {
                    day,
                    month,
                    year,
                    page,
                    all,
                } => {
                    let filter = if all {
                        DateFilter::default()
                    } else if day.is_none() && month.is_none() && year.is_none() {
                        DateFilter::on(today)
                    } else {
                        DateFilter { day, month, year }
                    };
                    if surface.set_filter(filter).is_err() {
                        return Ok(());
                    }
                    surface.set_page(page);
                    let listing = surface.visible_page(now);
                    for appointment in &listing.items {
                        println!(
                            "#{:<4} {} .. {}  {}: {}",
                            appointment.id,
                            appointment.starts_at.format("%Y-%m-%d %H:%M"),
                            appointment.ends_at.format("%H:%M"),
                            appointment.title,
                            appointment.description,
                        );
                    }
                    println!("Página {} de {}", listing.number, listing.total_pages);
                }
                CitaCommands::Create {
                    adopter_id,
                    description,
                    start,
                    end,
                } => {
                    let form = AppointmentForm {
                        adopter_id: Some(adopter_id),
                        description,
                        starts_at: Some(start),
                        ends_at: Some(end),
                    };
                    surface.create(form).await?;
                    wait_for_loader(|| surface.is_loading()).await;
                }
                CitaCommands::Update {
                    id,
                    adopter_id,
                    description,
                    start,
                    end,
                } => {
                    let form = AppointmentForm {
                        adopter_id: Some(adopter_id),
                        description,
                        starts_at: Some(start),
                        ends_at: Some(end),
                    };
                    surface.update(id, form).await?;
                    wait_for_loader(|| surface.is_loading()).await;
                }
                CitaCommands::Move { id, start, end } => {
                    surface.reschedule(id, start, end).await?;
                    wait_for_loader(|| surface.is_loading()).await;
                }
                CitaCommands::Delete { id } => {
                    let confirmed =
                        Confirm::new("¿Eliminar cita? Esta acción no se puede deshacer.")
                            .with_default(false)
                            .prompt()?;
                    if !confirmed {
                        return Ok(());
                    }
                    surface.delete(id).await?;
                    wait_for_loader(|| surface.is_loading()).await;
                }
            }
        }

        Commands::Adoptantes(command) => {
            let mut surface = AppointmentsSurface::new(client, sink, min_loader, today);
            surface.refresh().await?;
            match command {
                AdopterCommands::List { search } => {
                    let needle = search.unwrap_or_default();
                    for adopter in surface.adopters_matching(&needle) {
                        println!(
                            "#{:<4} {:<25} {:<25} {}",
                            adopter.id, adopter.name, adopter.email, adopter.phone,
                        );
                    }
                }
                AdopterCommands::Create {
                    name,
                    email,
                    phone,
                    address,
                } => {
                    surface
                        .create_adopter(AdopterForm {
                            name,
                            email,
                            phone,
                            address,
                        })
                        .await?;
                    wait_for_loader(|| surface.is_loading()).await;
                }
            }
        }

        Commands::Adopciones(command) => {
            let mut surface = AdoptionsSurface::new(client, sink, min_loader);
            match command {
                AdoptionCommands::List => {
                    surface.refresh_list().await?;
                    for adoption in surface.adoptions() {
                        println!(
                            "{}  {:<20} {:<25} {}",
                            adoption.date,
                            adoption.animal_name,
                            adoption.adopter_name,
                            adoption.notes.as_deref().unwrap_or(""),
                        );
                    }
                }
                AdoptionCommands::Create {
                    animal_id,
                    adopter_id,
                    date,
                    notes,
                } => {
                    surface.refresh_catalogue().await?;
                    let form = AdoptionForm {
                        animal_id: Some(animal_id),
                        adopter_id: Some(adopter_id),
                        date: Some(date),
                        notes,
                    };
                    surface.register(form).await?;
                    wait_for_loader(|| surface.is_loading()).await;
                }
            }
        }

        Commands::CreateUser { name, email, role } => {
            let password = Password::new("Contraseña")
                .without_confirmation()
                .prompt()?;
            let confirm_password = Password::new("Confirmar contraseña")
                .without_confirmation()
                .prompt()?;
            let mut surface = CreateUserSurface::new(client, sink, min_loader);
            surface
                .register(NewUserForm {
                    name,
                    email,
                    password,
                    confirm_password,
                    role,
                })
                .await?;
            wait_for_loader(|| surface.is_loading()).await;
        }

        Commands::Stats { period } => {
            let mut surface = StatsSurface::new(client, sink);
            surface.load(period).await?;
            println!("Adopciones vs Citas ({})", period.label());
            for row in surface.comparison() {
                println!(
                    "{}  adopciones: {:<4} citas: {}",
                    row.date, row.adoptions, row.appointments
                );
            }
            if let Some(report) = surface.report() {
                if !report.by_species.is_empty() {
                    println!("Especies:");
                    for entry in &report.by_species {
                        println!("  {:<15} {}", entry.label, entry.count);
                    }
                }
                if !report.by_sex.is_empty() {
                    println!("Sexo:");
                    for entry in &report.by_sex {
                        println!("  {:<15} {}", entry.label, entry.count);
                    }
                }
            }
        }
    }
    Ok(())
}

// The deferred notification prints from the guard's flush timer; hold the
// process open until the loader window has elapsed.
async fn wait_for_loader(is_loading: impl Fn() -> bool) {
    while is_loading() {
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
}

fn parse_datetime(raw: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .map_err(|_| format!("fecha/hora no válida (se espera AAAA-MM-DDTHH:MM): {raw}"))
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| format!("fecha no válida (se espera AAAA-MM-DD): {raw}"))
}

fn parse_role(raw: &str) -> Result<Role, String> {
    match raw.to_lowercase().as_str() {
        "admin" => Ok(Role::Admin),
        "trabajador" => Ok(Role::Worker),
        "voluntario" => Ok(Role::Volunteer),
        _ => Err(format!("rol desconocido: {raw}")),
    }
}

fn parse_period(raw: &str) -> Result<StatsPeriod, String> {
    StatsPeriod::parse(raw).ok_or_else(|| format!("periodo desconocido: {raw}"))
}

fn parse_sex(raw: &str) -> Result<Sex, String> {
    match raw.to_lowercase().as_str() {
        "macho" => Ok(Sex::Male),
        "hembra" => Ok(Sex::Female),
        _ => Err(format!("sexo desconocido: {raw}")),
    }
}

fn parse_stage(raw: &str) -> Result<LifeStage, String> {
    match raw.to_lowercase().as_str() {
        "cachorro" | "joven" => Ok(LifeStage::Young),
        "adulto" => Ok(LifeStage::Adult),
        "senior" => Ok(LifeStage::Senior),
        _ => Err(format!("etapa desconocida: {raw}")),
    }
}
