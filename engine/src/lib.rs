//! 13x13 흐네프타플(Hnefatafl) 규칙 엔진
//!
//! 보드 모델, 이동 생성, 캡처 판정, 게임 진행을 렌더링과 분리된 순수 로직으로 제공한다.
//! 화면(WASM/JS)은 `GameState`의 `select_square` / `request_move` / `reset`만 호출한다.

pub mod board;
pub mod capture;
pub mod game;
pub mod movegen;

pub use board::{Board, BoardError, Coord, Direction, Side, Square, BOARD_SIZE, CORNERS, THRONE};
pub use capture::{resolve_captures, CaptureReport};
pub use game::{GameResult, GameState, MoveOutcome, MoveReport, Selection};
pub use movegen::sliding_destinations;

/// 디버그 로그 출력 (WASM 환경에서는 JS console.log로 전달)
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn log_debug(msg: &str) {
    log(msg);
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn log_debug(msg: &str) {
    println!("DEBUG: {}", msg);
}
