use actix::{Actor, ActorContext, AsyncContext, Handler, Message, StreamHandler};
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;

use board::serde::Deserialize;
use board::serde_json;
use board::uuid::Uuid;
use board::{ClientEvent, ClientId, RoomId};

use crate::registry::RoomRegistry;
use crate::room::{ConnectionEvent, RoomCommand, RoomTx};

#[derive(Message)]
#[rtype(result = "()")]
struct ConnectionActorMessage(ConnectionEvent);

/// One WebSocket peer. The actor owns the socket; the room talks to it
/// through the egress channel opened in `started`.
struct ConnectionActor {
    client_id: ClientId,
    username: String,
    room_id: RoomId,
    room_tx: RoomTx,
}

impl Actor for ConnectionActor {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<ConnectionEvent>();

        let join = RoomCommand::Join {
            client_id: self.client_id,
            username: self.username.clone(),
            tx,
        };
        if self.room_tx.send(join).is_err() {
            log::warn!("room {} is gone, refusing connection", self.room_id);
            ctx.stop();
            return;
        }

        let addr = ctx.address().recipient();

        tokio::spawn(async move {
            log::debug!("connection green thread - started");
            while let Some(event) = rx.recv().await {
                if addr.do_send(ConnectionActorMessage(event)).is_err() {
                    break;
                }
            }
            log::debug!("connection green thread - terminated");
        });
    }

    // Runs exactly once however the socket went away, so the room always
    // learns about the departure. The room treats a repeat as a no-op.
    fn stopped(&mut self, _: &mut Self::Context) {
        if self
            .room_tx
            .send(RoomCommand::Leave {
                from: self.client_id,
            })
            .is_err()
        {
            log::debug!("room {} is gone, skipping leave", self.room_id);
        }
    }
}

/// Ingress
impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for ConnectionActor {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(msg)) => ctx.pong(&msg),
            Ok(ws::Message::Text(text)) => match serde_json::from_str::<ClientEvent>(&text) {
                Ok(event) => {
                    let command = RoomCommand::Event {
                        from: self.client_id,
                        event,
                        raw: text,
                    };
                    if self.room_tx.send(command).is_err() {
                        log::warn!("room {} is gone, closing connection", self.room_id);
                        ctx.stop();
                    }
                }
                Err(error) => {
                    // Unknown or malformed frames are dropped; the
                    // connection stays up.
                    log::debug!("dropping unreadable frame from {}: {}", self.client_id, error);
                }
            },
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(_) => (),
            Err(error) => {
                log::debug!("socket error on {}: {}", self.client_id, error);
                ctx.stop();
            }
        }
    }
}

/// Egress
impl Handler<ConnectionActorMessage> for ConnectionActor {
    type Result = ();

    fn handle(
        &mut self,
        msg: ConnectionActorMessage,
        ctx: &mut ws::WebsocketContext<Self>,
    ) -> Self::Result {
        match msg.0 {
            ConnectionEvent::Event(event) => match serde_json::to_string(&event) {
                Ok(text) => ctx.text(text),
                Err(error) => log::error!("failed to encode {:?}: {}", event, error),
            },
            ConnectionEvent::Relay(text) => ctx.text(text),
        }
    }
}

#[derive(Deserialize)]
pub struct WsParams {
    room_id: String,
    username: String,
}

pub async fn ws_index(
    req: HttpRequest,
    stream: web::Payload,
    params: web::Path<WsParams>,
    registry: web::Data<RoomRegistry>,
) -> Result<HttpResponse, Error> {
    let WsParams { room_id, username } = params.into_inner();
    let room_tx = registry.get_or_create(&room_id);
    ws::start(
        ConnectionActor {
            client_id: Uuid::new_v4(),
            username,
            room_id,
            room_tx,
        },
        &req,
        stream,
    )
}
