use wasm_bindgen::prelude::*;
use serde::{Serialize, Deserialize};
use web_sys::console;
use hnefatafl::{Coord, GameResult, GameState, MoveOutcome, Selection, Side};

/// JS에서 사용할 게임 래퍼 (선택 상태는 화면 쪽 소유)
#[wasm_bindgen]
pub struct Game {
    state: GameState,
    selection: Selection,
}

/// JS로 전달할 좌표
#[derive(Serialize, Deserialize)]
pub struct JsCoord {
    pub id: String, // "a1" ~ "m13"
    pub row: i32,
    pub col: i32,
}

/// JS로 전달할 칸 정보 (표시용 플래그는 매번 새로 계산)
#[derive(Serialize, Deserialize)]
pub struct JsSquare {
    pub id: String,
    pub row: i32,
    pub col: i32,
    pub occupant: String, // "attacker", "defender", "free"
    pub is_king: bool,
    pub is_corner: bool,
    pub is_throne: bool,
    pub is_selected: bool,
    pub is_available: bool,
}

/// JS로 전달할 선택 정보
#[derive(Serialize, Deserialize)]
pub struct JsSelection {
    pub source: Option<JsCoord>,
    pub destinations: Vec<JsCoord>,
}

/// JS로 전달할 게임 상태
#[derive(Serialize, Deserialize)]
pub struct JsGameState {
    pub squares: Vec<JsSquare>,
    pub current_player: u8,
    pub turn_label: String,
    pub is_game_over: bool,
    pub winner: Option<u8>,
    pub winner_label: Option<String>,
    pub attackers: usize,
    pub defenders: usize,
}

/// JS로 전달할 이동 결과
#[derive(Serialize, Deserialize)]
pub struct JsMoveResult {
    pub outcome: String, // "Applied", "RejectedIllegalMove", "RejectedNotYourTurn", "RejectedGameFinished"
    pub captured: Vec<JsCoord>,
    pub is_game_over: bool,
    pub winner: Option<u8>,
}

/// JS로 전달할 클릭 처리 결과
#[derive(Serialize, Deserialize)]
pub struct JsClickResult {
    pub action: String,
    pub move_result: Option<JsMoveResult>,
}

/// 클릭 한 번의 처리 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickAction {
    Ignored,
    Selected,
    Deselected,
    Moved(MoveOutcome),
}

#[wasm_bindgen]
impl Game {
    /// 새 게임 생성
    #[wasm_bindgen(constructor)]
    pub fn new() -> Game {
        Game {
            state: GameState::new(),
            selection: Selection::default(),
        }
    }

    /// 보드 초기화
    #[wasm_bindgen]
    pub fn reset(&mut self) {
        self.state.reset();
        self.selection.clear();
    }

    /// 디버그 모드 설정 (엔진 판정 과정 로그)
    #[wasm_bindgen]
    pub fn set_debug(&mut self, enabled: bool) {
        self.state.debug_mode = enabled;
    }

    /// 현재 게임 상태를 JSON으로 반환
    #[wasm_bindgen]
    pub fn get_state(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.build_js_state())?)
    }

    /// 칸 선택 후 이동 가능한 칸 목록 반환
    #[wasm_bindgen]
    pub fn select_square(&mut self, row: i32, col: i32) -> Result<JsValue, JsValue> {
        let coord = to_coord(row, col)?;
        self.selection = self.state.select_square(coord);
        Ok(serde_wasm_bindgen::to_value(&self.build_js_selection())?)
    }

    /// 선택 해제
    #[wasm_bindgen]
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// 기물 이동 요청
    #[wasm_bindgen]
    pub fn request_move(&mut self, from_row: i32, from_col: i32, to_row: i32, to_col: i32) -> Result<JsValue, JsValue> {
        let from = to_coord(from_row, from_col)?;
        let to = to_coord(to_row, to_col)?;

        let outcome = self.state.request_move(from, to);
        if outcome.is_applied() {
            self.selection.clear();
        }
        Ok(serde_wasm_bindgen::to_value(&self.build_move_result(&outcome))?)
    }

    /// 칸 클릭 (선택 / 선택 해제 / 이동)
    #[wasm_bindgen]
    pub fn click(&mut self, row: i32, col: i32) -> Result<JsValue, JsValue> {
        let coord = to_coord(row, col)?;
        if self.state.debug_mode {
            console::log_1(&format!("clicked on square: {}", coord).into());
        }

        let result = match self.click_at(coord) {
            ClickAction::Ignored => JsClickResult { action: "ignored".to_string(), move_result: None },
            ClickAction::Selected => JsClickResult { action: "selected".to_string(), move_result: None },
            ClickAction::Deselected => JsClickResult { action: "deselected".to_string(), move_result: None },
            ClickAction::Moved(outcome) => JsClickResult {
                action: "moved".to_string(),
                move_result: Some(self.build_move_result(&outcome)),
            },
        };
        Ok(serde_wasm_bindgen::to_value(&result)?)
    }

    /// 현재 플레이어 (0=백/수비, 1=흑/공격)
    #[wasm_bindgen]
    pub fn current_player(&self) -> u8 {
        player_id(self.state.turn())
    }

    /// 게임 종료 여부
    #[wasm_bindgen]
    pub fn is_game_over(&self) -> bool {
        !self.state.is_active()
    }

    /// 승자 (0=진행중, 1=백, 2=흑)
    #[wasm_bindgen]
    pub fn winner(&self) -> u8 {
        match self.state.result() {
            GameResult::Ongoing => 0,
            GameResult::DefenderWins => 1,
            GameResult::AttackerWins => 2,
        }
    }

    /// 텍스트 보드 (디버깅용)
    #[wasm_bindgen]
    pub fn board_text(&self) -> String {
        self.state.board().to_string()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    // === Private helpers ===

    fn click_at(&mut self, coord: Coord) -> ClickAction {
        if !self.state.is_active() {
            return ClickAction::Ignored;
        }

        // 선택된 칸을 다시 누르면 해제
        if self.selection.is_selected(coord) {
            self.selection.clear();
            return ClickAction::Deselected;
        }

        let square = match self.state.board().get(coord) {
            Some(square) => square,
            None => return ClickAction::Ignored,
        };

        // 자기 기물: 선택 (또는 선택 변경)
        if square.belongs_to(self.state.turn()) {
            self.selection = self.state.select_square(coord);
            return ClickAction::Selected;
        }

        if let Some(source) = self.selection.source {
            if self.selection.is_available(coord) {
                let outcome = self.state.request_move(source, coord);
                self.selection.clear();
                return ClickAction::Moved(outcome);
            }
        }

        if square.is_empty() {
            self.selection.clear();
            ClickAction::Deselected
        } else {
            ClickAction::Ignored
        }
    }

    fn build_js_state(&self) -> JsGameState {
        let board = self.state.board();
        let squares: Vec<JsSquare> = board.squares().map(|(coord, square)| {
            JsSquare {
                id: coord.to_notation(),
                row: coord.row,
                col: coord.col,
                occupant: occupant_name(square.side()).to_string(),
                is_king: square.is_king,
                is_corner: coord.is_corner(),
                is_throne: coord.is_throne(),
                is_selected: self.selection.is_selected(coord),
                is_available: self.selection.is_available(coord),
            }
        }).collect();

        let winner = self.state.winner();
        JsGameState {
            squares,
            current_player: player_id(self.state.turn()),
            turn_label: self.state.turn().player_label().to_string(),
            is_game_over: !self.state.is_active(),
            winner: winner.map(|side| player_id(side) + 1),
            winner_label: winner.map(|side| side.player_label().to_string()),
            attackers: board.count(Side::Attacker),
            defenders: board.count(Side::Defender),
        }
    }

    fn build_js_selection(&self) -> JsSelection {
        JsSelection {
            source: self.selection.source.map(js_coord),
            destinations: self.selection.destinations.iter().copied().map(js_coord).collect(),
        }
    }

    fn build_move_result(&self, outcome: &MoveOutcome) -> JsMoveResult {
        let captured = match outcome {
            MoveOutcome::Applied(report) => report.captured.iter().copied().map(js_coord).collect(),
            _ => Vec::new(),
        };
        JsMoveResult {
            outcome: outcome.name().to_string(),
            captured,
            is_game_over: !self.state.is_active(),
            winner: self.state.winner().map(|side| player_id(side) + 1),
        }
    }
}

fn to_coord(row: i32, col: i32) -> Result<Coord, JsValue> {
    Coord::try_new(row, col).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn js_coord(coord: Coord) -> JsCoord {
    JsCoord {
        id: coord.to_notation(),
        row: coord.row,
        col: coord.col,
    }
}

fn player_id(side: Side) -> u8 {
    match side {
        Side::Defender => 0,
        Side::Attacker => 1,
    }
}

fn occupant_name(occupant: Option<Side>) -> &'static str {
    match occupant {
        Some(Side::Attacker) => "attacker",
        Some(Side::Defender) => "defender",
        None => "free",
    }
}

#[wasm_bindgen(start)]
pub fn main() {
    console::log_1(&"Hnefatafl WASM initialized!".into());
}
