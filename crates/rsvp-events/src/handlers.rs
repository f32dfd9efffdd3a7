use super::*;
use actix_web::HttpResponse;
use actix_web::web;
use rsvp_auth::ApiError;
use rsvp_auth::Auth;
use rsvp_auth::Credentials;
use rsvp_auth::authorize;
use rsvp_core::ID;
use rsvp_core::StoreError;
use rsvp_core::Unique;
use validator::Validate;

const NO_EVENT: &str = "event not found";
const NO_USER: &str = "user not found";

/// Fetches an event the caller owns.
///
/// Existence is checked before ownership: absent events are not-found
/// for everyone, present ones are forbidden to everyone but the owner.
async fn owned(
    db: &dyn Store,
    id: ID<Event>,
    auth: &Auth,
    reason: &'static str,
) -> Result<Event, ApiError> {
    let event = db.event(id).await?.ok_or(ApiError::NotFound(NO_EVENT))?;
    authorize(&auth.identity(), event.owner())
        .or_forbid(reason)
        .inspect_err(|_| log::info!("member {} denied on event {}", auth.member().id(), id))?;
    Ok(event)
}

pub async fn list(db: web::Data<dyn Store>) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(db.events().await?))
}

pub async fn fetch(
    db: web::Data<dyn Store>,
    path: web::Path<uuid::Uuid>,
) -> Result<HttpResponse, ApiError> {
    db.event(ID::from(path.into_inner()))
        .await?
        .map(|event| HttpResponse::Ok().json(event))
        .ok_or(ApiError::NotFound(NO_EVENT))
}

pub async fn create(
    db: web::Data<dyn Store>,
    auth: Auth,
    req: web::Json<EventRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;
    let event = Event::new(ID::default(), auth.member().id(), req.into_inner());
    db.insert(&event).await?;
    log::info!("member {} created event {}", event.owner(), event.id());
    Ok(HttpResponse::Created().json(event))
}

pub async fn update(
    db: web::Data<dyn Store>,
    auth: Auth,
    path: web::Path<uuid::Uuid>,
    req: web::Json<EventRequest>,
) -> Result<HttpResponse, ApiError> {
    let event = owned(
        db.get_ref(),
        ID::from(path.into_inner()),
        &auth,
        "you are not authorized to update this event",
    )
    .await?;
    req.validate()?;
    let event = event.revise(req.into_inner());
    match db.update(&event).await {
        Ok(()) => Ok(HttpResponse::Ok().json(event)),
        Err(StoreError::Missing) => Err(ApiError::NotFound(NO_EVENT)),
        Err(e) => Err(e.into()),
    }
}

pub async fn delete(
    db: web::Data<dyn Store>,
    auth: Auth,
    path: web::Path<uuid::Uuid>,
) -> Result<HttpResponse, ApiError> {
    let event = owned(
        db.get_ref(),
        ID::from(path.into_inner()),
        &auth,
        "you are not authorized to delete this event",
    )
    .await?;
    db.remove(event.id()).await?;
    log::info!("member {} deleted event {}", auth.member().id(), event.id());
    Ok(HttpResponse::NoContent().finish())
}

pub async fn attendees(
    db: web::Data<dyn Store>,
    path: web::Path<uuid::Uuid>,
) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(db.attendees(ID::from(path.into_inner())).await?))
}

pub async fn attending(
    db: web::Data<dyn Store>,
    path: web::Path<uuid::Uuid>,
) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(db.attending(ID::from(path.into_inner())).await?))
}

pub async fn attend(
    db: web::Data<dyn Store>,
    auth: Auth,
    path: web::Path<(uuid::Uuid, uuid::Uuid)>,
) -> Result<HttpResponse, ApiError> {
    let (event, user) = path.into_inner();
    let event = owned(
        db.get_ref(),
        ID::from(event),
        &auth,
        "you are not authorized to add an attendee to this event",
    )
    .await?;
    let guest = db.member(ID::from(user)).await?.ok_or(ApiError::NotFound(NO_USER))?;
    let attendee = Attendee::new(ID::default(), event.id(), guest.id());
    match db.attend(&attendee).await {
        Ok(()) => Ok(HttpResponse::Created().json(attendee)),
        Err(StoreError::Conflict) => Err(ApiError::Conflict("attendee already exists")),
        Err(StoreError::Missing) => Err(ApiError::NotFound(NO_EVENT)),
        Err(e) => Err(e.into()),
    }
}

pub async fn unattend(
    db: web::Data<dyn Store>,
    auth: Auth,
    path: web::Path<(uuid::Uuid, uuid::Uuid)>,
) -> Result<HttpResponse, ApiError> {
    let (event, user) = path.into_inner();
    let event = owned(
        db.get_ref(),
        ID::from(event),
        &auth,
        "you are not authorized to delete an attendee from this event",
    )
    .await?;
    db.unattend(event.id(), ID::from(user)).await?;
    Ok(HttpResponse::NoContent().finish())
}
