//! Wire messages exchanged with the game server.
//!
//! Inbound messages are internally tagged by `type`. Snapshot payloads use the
//! server's PascalCase field names; they are decoded into plain DTOs first and
//! then validated into a [`GameState`].

use game_core::{
    ActivePowerUp, AgentId, Animal, Cell, CellContent, GameState, Position, PowerUpKind,
    SnapshotError, Tick, UnknownContent, Zookeeper,
};
use serde::Deserialize;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// The server assigned this bot its agent id.
    Registered { bot_id: String },
    GameState(SnapshotDto),
    Disconnect,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SnapshotDto {
    pub tick: u64,
    pub cells: Vec<CellDto>,
    #[serde(default)]
    pub animals: Vec<AnimalDto>,
    #[serde(default)]
    pub zookeepers: Vec<ZookeeperDto>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CellDto {
    pub x: i32,
    pub y: i32,
    pub content: u8,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AnimalDto {
    pub id: String,
    #[serde(default)]
    pub nickname: String,
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub spawn_x: i32,
    #[serde(default)]
    pub spawn_y: i32,
    #[serde(default)]
    pub score: u64,
    #[serde(default)]
    pub captured_counter: u32,
    #[serde(default)]
    pub distance_covered: u64,
    #[serde(default = "viable")]
    pub is_viable: bool,
    #[serde(default)]
    pub held_power_up: Option<u8>,
    #[serde(default)]
    pub active_power_up: Option<ActivePowerUpDto>,
    #[serde(default)]
    pub score_streak: u32,
}

fn viable() -> bool {
    true
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ActivePowerUpDto {
    #[serde(default)]
    pub value: f64,
    pub ticks_remaining: u32,
    #[serde(rename = "Type")]
    pub kind: u8,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ZookeeperDto {
    pub id: String,
    pub x: i32,
    pub y: i32,
}

/// Outbound command line.
pub fn encode_command(command: &game_core::BotCommand) -> serde_json::Result<String> {
    serde_json::to_string(command)
}

#[derive(Debug, Error, PartialEq)]
pub enum DecodeError {
    #[error(transparent)]
    Content(#[from] UnknownContent),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

impl TryFrom<SnapshotDto> for GameState {
    type Error = DecodeError;

    fn try_from(dto: SnapshotDto) -> Result<Self, Self::Error> {
        let cells = dto
            .cells
            .into_iter()
            .map(|cell| {
                let content = CellContent::try_from(cell.content)?;
                Ok(Cell::at(cell.x, cell.y, content))
            })
            .collect::<Result<Vec<_>, UnknownContent>>()?;

        let animals = dto.animals.into_iter().map(Animal::from).collect();
        let zookeepers = dto
            .zookeepers
            .into_iter()
            .map(|keeper| Zookeeper::new(keeper.id, Position::new(keeper.x, keeper.y)))
            .collect();

        Ok(GameState::new(Tick(dto.tick), cells, animals, zookeepers)?)
    }
}

impl From<AnimalDto> for Animal {
    fn from(dto: AnimalDto) -> Self {
        Animal {
            id: AgentId::new(dto.id),
            nickname: dto.nickname,
            position: Position::new(dto.x, dto.y),
            spawn: Position::new(dto.spawn_x, dto.spawn_y),
            score: dto.score,
            captured_counter: dto.captured_counter,
            distance_covered: dto.distance_covered,
            is_viable: dto.is_viable,
            held_power_up: dto.held_power_up.map(PowerUpKind::from),
            active_power_up: dto.active_power_up.map(|active| {
                ActivePowerUp::new(
                    PowerUpKind::from(active.kind),
                    active.ticks_remaining,
                    active.value,
                )
            }),
            score_streak: dto.score_streak,
        }
    }
}

#[cfg(test)]
mod tests {
    use game_core::{Action, BotCommand, Direction};

    use super::*;

    const SNAPSHOT: &str = r#"{
        "type": "game_state",
        "Tick": 12,
        "Cells": [
            {"X": 0, "Y": 0, "Content": 0},
            {"X": 1, "Y": 0, "Content": 2},
            {"X": 0, "Y": 1, "Content": 1},
            {"X": 1, "Y": 1, "Content": 5}
        ],
        "Animals": [{
            "Id": "a-1", "Nickname": "moose", "X": 0, "Y": 0,
            "SpawnX": 0, "SpawnY": 0, "Score": 40, "ScoreStreak": 3,
            "HeldPowerUp": 1,
            "ActivePowerUp": {"Value": 2.0, "TicksRemaining": 5, "Type": 2}
        }],
        "Zookeepers": [{"Id": "z-1", "X": 1, "Y": 1}]
    }"#;

    #[test]
    fn decodes_snapshot_into_game_state() {
        let ServerMessage::GameState(dto) = serde_json::from_str(SNAPSHOT).unwrap() else {
            panic!("expected a game state");
        };
        let state = GameState::try_from(dto).unwrap();

        assert_eq!(state.tick, Tick(12));
        assert_eq!(state.grid.width(), 2);
        assert_eq!(state.grid.content(Position::new(1, 1)), Some(CellContent::PowerPellet));

        let animal = state.animal(&AgentId::from("a-1")).unwrap();
        assert_eq!(animal.score_streak, 3);
        assert!(animal.is_viable);
        assert_eq!(animal.held_power_up, Some(PowerUpKind::ChameleonCloak));
        assert_eq!(
            animal.active_power_up.map(|active| active.kind),
            Some(PowerUpKind::Scavenger)
        );
        assert_eq!(state.zookeepers[0].position, Position::new(1, 1));
    }

    #[test]
    fn decodes_control_messages() {
        let registered: ServerMessage =
            serde_json::from_str(r#"{"type":"registered","bot_id":"abc"}"#).unwrap();
        assert_eq!(
            registered,
            ServerMessage::Registered {
                bot_id: "abc".into()
            }
        );

        let disconnect: ServerMessage = serde_json::from_str(r#"{"type":"disconnect"}"#).unwrap();
        assert_eq!(disconnect, ServerMessage::Disconnect);
    }

    #[test]
    fn rejects_unknown_content_and_holes() {
        let unknown = SnapshotDto {
            tick: 1,
            cells: vec![CellDto { x: 0, y: 0, content: 42 }],
            animals: Vec::new(),
            zookeepers: Vec::new(),
        };
        assert_eq!(
            GameState::try_from(unknown),
            Err(DecodeError::Content(UnknownContent(42)))
        );

        let empty = SnapshotDto {
            tick: 1,
            cells: Vec::new(),
            animals: Vec::new(),
            zookeepers: Vec::new(),
        };
        assert_eq!(
            GameState::try_from(empty),
            Err(DecodeError::Snapshot(SnapshotError::Empty))
        );

        let far_flung = SnapshotDto {
            tick: 1,
            cells: vec![CellDto {
                x: 70_000,
                y: 70_000,
                content: 0,
            }],
            animals: Vec::new(),
            zookeepers: Vec::new(),
        };
        assert_eq!(
            GameState::try_from(far_flung),
            Err(DecodeError::Snapshot(SnapshotError::Dimensions {
                width: 70_001,
                height: 70_001,
                cells: 1
            }))
        );
    }

    #[test]
    fn commands_encode_as_wire_codes() {
        assert_eq!(
            encode_command(&BotCommand::from(Direction::Down)).unwrap(),
            r#"{"action":2}"#
        );
        assert_eq!(
            encode_command(&BotCommand::new(Action::UseItem)).unwrap(),
            r#"{"action":5}"#
        );
    }
}
