use std::sync::Arc;

use anyhow::{Context, Result, anyhow, bail};
use housing_console::{
    cli::{CliArgs, cli_args_from_env},
    config::Config,
    dashboard::{Dashboard, parse_amenity},
    entities::{EntityId, EntityKind, Facility, Identified, Resident, Room},
    logging::init_tracing,
    render::Summary,
    routes::Route,
    screens::{
        DeleteDialog, DeleteOutcome, DetailScreen, FacilityEditScreen, LinkedEditScreen,
        ListScreen, LoadOutcome, RecordForm, ResidentEditScreen, RoomEditScreen, RoomLinked,
        SaveOutcome, StoredRecord,
    },
    store::{EntityStore, HttpEntityStore},
};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli_args_from_env()?;
    let config = Config::load(&args.config_path)
        .with_context(|| format!("failed to load config from {}", args.config_path.display()))?;
    let _logging_guard =
        init_tracing(&config, &args.config_path).context("failed to initialize logging")?;

    let store: Arc<dyn EntityStore> = Arc::new(
        HttpEntityStore::new(&config.api).context("failed to construct entity store client")?,
    );

    tracing::info!(target: "console", route = %args.route, "route_opened");
    match args.route {
        Route::Home => show_dashboard(store, &args).await,
        Route::List(EntityKind::Room) => show_list(ListScreen::<Room>::new(store)).await,
        Route::List(EntityKind::Resident) => show_list(ListScreen::<Resident>::new(store)).await,
        Route::List(EntityKind::Facility) => show_list(ListScreen::<Facility>::new(store)).await,
        Route::RoomResidents(room_id) => {
            show_list(ListScreen::<Resident>::residents(store, Some(room_id))).await
        }
        Route::View(EntityKind::Room, id) => show_detail::<Room>(store, id).await,
        Route::View(EntityKind::Resident, id) => show_detail::<Resident>(store, id).await,
        Route::View(EntityKind::Facility, id) => show_detail::<Facility>(store, id).await,
        Route::New(EntityKind::Room) => edit_room(store, None, &args).await,
        Route::Edit(EntityKind::Room, id) => edit_room(store, Some(id), &args).await,
        Route::New(EntityKind::Resident) => {
            edit_linked(ResidentEditScreen::new(store), None, &args).await
        }
        Route::Edit(EntityKind::Resident, id) => {
            edit_linked(ResidentEditScreen::new(store), Some(id), &args).await
        }
        Route::New(EntityKind::Facility) => {
            edit_linked(FacilityEditScreen::new(store), None, &args).await
        }
        Route::Edit(EntityKind::Facility, id) => {
            edit_linked(FacilityEditScreen::new(store), Some(id), &args).await
        }
        Route::Delete(EntityKind::Room, id) => delete_record::<Room>(store, id, &args).await,
        Route::Delete(EntityKind::Resident, id) => {
            delete_record::<Resident>(store, id, &args).await
        }
        Route::Delete(EntityKind::Facility, id) => {
            delete_record::<Facility>(store, id, &args).await
        }
    }
}

async fn show_dashboard(store: Arc<dyn EntityStore>, args: &CliArgs) -> Result<()> {
    let mut dashboard = Dashboard::new(store);
    let selector = args.field("amenity");
    if parse_amenity(selector).is_some() {
        // The unfiltered list is what stays on screen if the filter query fails.
        dashboard.load().await;
    }
    dashboard.apply_filter(selector).await;

    match dashboard.filter().amenity() {
        Some(amenity) => println!("rooms with {amenity}:"),
        None => println!("rooms:"),
    }
    for room in dashboard.rooms() {
        println!("{}", room.summary());
    }
    Ok(())
}

async fn show_list<T>(mut screen: ListScreen<T>) -> Result<()>
where
    T: StoredRecord + Summary,
{
    if screen.load().await == LoadOutcome::Failed {
        eprintln!("{} list could not be loaded", T::KIND);
    }
    for record in screen.records() {
        println!("{}", record.summary());
    }
    if let Some(total) = screen.total_count() {
        println!("{} of {total}", screen.records().len());
    }
    Ok(())
}

async fn show_detail<T>(store: Arc<dyn EntityStore>, id: EntityId) -> Result<()>
where
    T: StoredRecord + Summary,
{
    let mut screen = DetailScreen::<T>::new(store);
    match screen.load(id).await {
        LoadOutcome::Loaded => {
            if let Some(record) = screen.record() {
                println!("{}", record.summary());
            }
            Ok(())
        }
        LoadOutcome::NotFound => bail!("{} {id} not found", T::KIND),
        LoadOutcome::Failed | LoadOutcome::Discarded => {
            bail!("{} {id} could not be loaded", T::KIND)
        }
    }
}

async fn edit_room(store: Arc<dyn EntityStore>, id: Option<EntityId>, args: &CliArgs) -> Result<()> {
    let mut screen = RoomEditScreen::new(store);
    if let Some(id) = id {
        ensure_loaded(EntityKind::Room, id, screen.load(id).await)?;
    }
    for (field, value) in &args.fields {
        screen.form_mut().set_field(field, value)?;
    }
    if args.patch {
        report_save(screen.save_changes().await)
    } else {
        report_save(screen.save().await)
    }
}

async fn edit_linked<F>(
    mut screen: LinkedEditScreen<F>,
    id: Option<EntityId>,
    args: &CliArgs,
) -> Result<()>
where
    F: RecordForm + RoomLinked,
    F::Record: StoredRecord + Summary,
{
    let outcome = screen.open(id).await;
    if let Some(id) = id {
        ensure_loaded(<F::Record as Identified>::KIND, id, outcome)?;
    }

    for (field, value) in &args.fields {
        if field == "room" {
            let room_id = match value.trim() {
                "" => None,
                text => Some(
                    text.parse::<EntityId>()
                        .map_err(|err| anyhow!("invalid room id {text}: {err}"))?,
                ),
            };
            screen.select_room(room_id)?;
        } else {
            screen.form_mut().set_field(field, value)?;
        }
    }

    if args.fields.is_empty() {
        println!("selectable rooms:");
        for room in screen.rooms() {
            println!("{}", room.summary());
        }
        return Ok(());
    }
    if args.patch {
        report_save(screen.save_changes().await)
    } else {
        report_save(screen.save().await)
    }
}

fn ensure_loaded(kind: EntityKind, id: EntityId, outcome: LoadOutcome) -> Result<()> {
    match outcome {
        LoadOutcome::Loaded => Ok(()),
        LoadOutcome::NotFound => bail!("{kind} {id} not found"),
        LoadOutcome::Failed | LoadOutcome::Discarded => bail!("{kind} {id} could not be loaded"),
    }
}

fn report_save<T: Summary>(outcome: SaveOutcome<T>) -> Result<()> {
    match outcome {
        SaveOutcome::Saved(record) => {
            println!("saved: {}", record.summary().trim_start());
            Ok(())
        }
        SaveOutcome::Invalid(err) => Err(err.into()),
        SaveOutcome::Failed(message) => bail!("save failed: {message}"),
        SaveOutcome::Discarded => bail!("save was abandoned"),
    }
}

async fn delete_record<T>(store: Arc<dyn EntityStore>, id: EntityId, args: &CliArgs) -> Result<()>
where
    T: StoredRecord + Summary,
{
    let mut detail = DetailScreen::<T>::new(Arc::clone(&store));
    ensure_loaded(T::KIND, id, detail.load(id).await)?;
    let record = detail
        .record()
        .cloned()
        .ok_or_else(|| anyhow!("{} {id} not found", T::KIND))?;

    println!("delete {}?", record.summary().trim_start());
    let mut dialog = DeleteDialog::new(store, record);
    if !args.confirmed {
        dialog.cancel();
        println!("not deleted; pass --yes to confirm");
        return Ok(());
    }

    match dialog.confirm_delete().await {
        DeleteOutcome::Deleted => {
            println!("deleted");
            Ok(())
        }
        DeleteOutcome::Failed(message) => bail!("delete failed: {message}"),
        DeleteOutcome::Dismissed | DeleteOutcome::Discarded => bail!("delete was abandoned"),
    }
}
