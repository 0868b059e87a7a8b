use crate::board::{Board, Coord, Side};
use crate::capture::resolve_captures;
use crate::log_debug;
use crate::movegen::sliding_destinations;

/// 게임 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    Ongoing,
    DefenderWins,
    AttackerWins,
}

impl GameResult {
    fn won_by(side: Side) -> Self {
        match side {
            Side::Defender => GameResult::DefenderWins,
            Side::Attacker => GameResult::AttackerWins,
        }
    }

    pub fn winner(self) -> Option<Side> {
        match self {
            GameResult::Ongoing => None,
            GameResult::DefenderWins => Some(Side::Defender),
            GameResult::AttackerWins => Some(Side::Attacker),
        }
    }
}

/// 선택한 기물과 그 기물의 도착 가능 칸
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub source: Option<Coord>,
    pub destinations: Vec<Coord>,
}

impl Selection {
    pub fn is_selected(&self, coord: Coord) -> bool {
        self.source == Some(coord)
    }

    pub fn is_available(&self, coord: Coord) -> bool {
        self.destinations.contains(&coord)
    }

    pub fn clear(&mut self) {
        *self = Selection::default();
    }
}

/// 적용된 이동 정보
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReport {
    pub from: Coord,
    pub to: Coord,
    pub captured: Vec<Coord>,
    pub result: GameResult,
}

/// 이동 요청 처리 결과. 거부된 요청은 보드를 전혀 바꾸지 않는다
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    Applied(MoveReport),
    RejectedIllegalMove,
    RejectedNotYourTurn,
    RejectedGameFinished,
}

impl MoveOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, MoveOutcome::Applied(_))
    }

    pub fn name(&self) -> &'static str {
        match self {
            MoveOutcome::Applied(_) => "Applied",
            MoveOutcome::RejectedIllegalMove => "RejectedIllegalMove",
            MoveOutcome::RejectedNotYourTurn => "RejectedNotYourTurn",
            MoveOutcome::RejectedGameFinished => "RejectedGameFinished",
        }
    }
}

/// 게임 상태
///
/// 보드는 이 구조체만 변경한다. 게임이 끝나면 `reset` 전까지 보드와 차례는 고정된다.
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    turn: Side,
    result: GameResult,
    pub debug_mode: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// 초기 배치로 새 게임 (수비측 선공)
    pub fn new() -> Self {
        Self::from_position(Board::initial(), Side::Defender)
    }

    /// 임의의 포지션에서 진행 중인 게임 시작 (실험/테스트용)
    pub fn from_position(board: Board, turn: Side) -> Self {
        Self {
            board,
            turn,
            result: GameResult::Ongoing,
            debug_mode: false,
        }
    }

    /// 초기 배치로 되돌림. 디버그 설정은 유지
    pub fn reset(&mut self) {
        self.board = Board::initial();
        self.turn = Side::Defender;
        self.result = GameResult::Ongoing;
        self.debug("게임 초기화");
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// 현재 차례 (게임이 끝났으면 마지막으로 둔 쪽)
    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn result(&self) -> GameResult {
        self.result
    }

    pub fn is_active(&self) -> bool {
        self.result == GameResult::Ongoing
    }

    pub fn winner(&self) -> Option<Side> {
        self.result.winner()
    }

    fn debug(&self, msg: &str) {
        if self.debug_mode {
            log_debug(&format!("[Hnefatafl] {}", msg));
        }
    }

    /// `from` 기물의 합법 도착 칸. 왕이 아닌 기물은 귀퉁이에 갈 수 없다
    pub fn legal_destinations(&self, from: Coord) -> Vec<Coord> {
        let is_king = self.board.get(from).map_or(false, |square| square.is_king);
        sliding_destinations(&self.board, from)
            .into_iter()
            .filter(|to| is_king || !to.is_corner())
            .collect()
    }

    /// 칸 선택. 현재 차례 쪽 기물이 아니면 빈 선택을 돌려준다
    pub fn select_square(&self, coord: Coord) -> Selection {
        if !self.is_active() {
            return Selection::default();
        }
        match self.board.get(coord) {
            Some(square) if square.belongs_to(self.turn) => Selection {
                source: Some(coord),
                destinations: self.legal_destinations(coord),
            },
            _ => Selection::default(),
        }
    }

    /// 이동 요청 처리
    ///
    /// 검증 → 이동 → 캡처 판정 → 제거 → 승패 확인 → 차례 넘김 순서.
    /// 좌표가 보드 밖이면 호출자 버그이므로 패닉한다.
    pub fn request_move(&mut self, from: Coord, to: Coord) -> MoveOutcome {
        assert!(from.is_valid() && to.is_valid(), "보드 범위를 벗어난 이동 요청입니다: {:?} -> {:?}", from, to);

        if !self.is_active() {
            self.debug(&format!("{} -> {} 거부: 이미 끝난 게임입니다", from, to));
            return MoveOutcome::RejectedGameFinished;
        }

        let moving = self.board.square(from);
        match moving.side() {
            None => {
                self.debug(&format!("{} -> {} 거부: 출발 칸에 기물이 없습니다", from, to));
                return MoveOutcome::RejectedIllegalMove;
            }
            Some(side) if side != self.turn => {
                self.debug(&format!("{} -> {} 거부: {}의 차례입니다", from, to, self.turn.player_label()));
                return MoveOutcome::RejectedNotYourTurn;
            }
            Some(_) => {}
        }

        if !self.legal_destinations(from).contains(&to) {
            self.debug(&format!("{} -> {} 거부: 갈 수 없는 칸입니다", from, to));
            return MoveOutcome::RejectedIllegalMove;
        }

        self.board.relocate(from, to);

        let report = resolve_captures(&self.board, to);
        for &coord in &report.captured {
            self.board.clear(coord);
        }
        self.debug(&format!("{} -> {} 이동, 캡처 {}개", from, to, report.captured.len()));

        match report.winner() {
            Some(winner) => {
                self.result = GameResult::won_by(winner);
                self.debug(&format!("게임 종료: {} 승리\n{}", winner.player_label(), self.board));
            }
            None => self.turn = self.turn.opponent(),
        }

        MoveOutcome::Applied(MoveReport {
            from,
            to,
            captured: report.captured,
            result: self.result,
        })
    }
}
