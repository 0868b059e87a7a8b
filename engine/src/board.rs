use std::fmt;

use thiserror::Error;

/// 보드 한 변의 길이 (13x13)
pub const BOARD_SIZE: i32 = 13;

const SIZE: usize = BOARD_SIZE as usize;

/// 왕좌 (왕의 시작 칸, 표시용)
pub const THRONE: Coord = Coord::new(6, 6);

/// 네 귀퉁이: 왕의 탈출 목표이자 양쪽 모두에게 적대적인 칸
pub const CORNERS: [Coord; 4] = [
    Coord::new(0, 0),
    Coord::new(0, BOARD_SIZE - 1),
    Coord::new(BOARD_SIZE - 1, 0),
    Coord::new(BOARD_SIZE - 1, BOARD_SIZE - 1),
];

/// 공격측(흑) 초기 배치: 보드 가장자리 24개
const ATTACKER_START: [(i32, i32); 24] = [
    (0, 2), (0, 5), (0, 6), (0, 7), (0, 10),
    (1, 1), (1, 11),
    (2, 0), (2, 12),
    (5, 0), (5, 12),
    (6, 0), (6, 12),
    (7, 0), (7, 12),
    (10, 0), (10, 12),
    (11, 1), (11, 11),
    (12, 2), (12, 5), (12, 6), (12, 7), (12, 10),
];

/// 수비측(백) 초기 배치: 왕좌 주변 12개 (왕 제외)
const DEFENDER_START: [(i32, i32); 12] = [
    (4, 6),
    (5, 5), (5, 6), (5, 7),
    (6, 4), (6, 5), (6, 7), (6, 8),
    (7, 5), (7, 6), (7, 7),
    (8, 6),
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("보드 범위를 벗어난 좌표입니다: ({row}, {col})")]
    OutOfBounds { row: i32, col: i32 },
    #[error("잘못된 칸 표기입니다: {0:?}")]
    InvalidNotation(String),
}

/// 진영
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// 흑, Player 2. 왕을 잡는 것이 목표
    Attacker,
    /// 백, Player 1. 왕을 귀퉁이로 탈출시키는 것이 목표
    Defender,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Attacker => Side::Defender,
            Side::Defender => Side::Attacker,
        }
    }

    pub fn is_white(self) -> bool {
        self == Side::Defender
    }

    /// 화면 표시용 플레이어 이름
    pub fn player_label(self) -> &'static str {
        match self {
            Side::Defender => "Player 1",
            Side::Attacker => "Player 2",
        }
    }
}

/// 직교 방향 (탐색 순서: 아래, 위, 왼쪽, 오른쪽)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Down,
    Up,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Down,
        Direction::Up,
        Direction::Left,
        Direction::Right,
    ];

    /// (행 변화량, 열 변화량)
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Down => (1, 0),
            Direction::Up => (-1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// 이 축에 수직인 두 방향
    pub fn perpendicular(self) -> [Direction; 2] {
        match self {
            Direction::Down | Direction::Up => [Direction::Left, Direction::Right],
            Direction::Left | Direction::Right => [Direction::Up, Direction::Down],
        }
    }
}

/// 보드 좌표 (0-indexed: row=0~12, col=0~12)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// 범위를 검사하여 생성
    pub fn try_new(row: i32, col: i32) -> Result<Self, BoardError> {
        let coord = Self::new(row, col);
        if coord.is_valid() {
            Ok(coord)
        } else {
            Err(BoardError::OutOfBounds { row, col })
        }
    }

    pub fn is_valid(&self) -> bool {
        self.row >= 0 && self.row < BOARD_SIZE && self.col >= 0 && self.col < BOARD_SIZE
    }

    /// `dir` 방향으로 `distance`칸 떨어진 좌표 (보드 밖일 수 있음)
    pub fn step(self, dir: Direction, distance: i32) -> Coord {
        let (dr, dc) = dir.delta();
        Coord::new(self.row + dr * distance, self.col + dc * distance)
    }

    pub fn is_corner(&self) -> bool {
        CORNERS.contains(self)
    }

    pub fn is_throne(&self) -> bool {
        *self == THRONE
    }

    /// "g7" 같은 문자열에서 파싱 (문자=행, 숫자=열+1)
    pub fn from_notation(s: &str) -> Result<Self, BoardError> {
        let invalid = || BoardError::InvalidNotation(s.to_string());

        let mut chars = s.chars();
        let letter = chars.next().ok_or_else(invalid)?.to_ascii_lowercase();
        if !letter.is_ascii_lowercase() {
            return Err(invalid());
        }
        let row = letter as i32 - 'a' as i32;
        let col = chars.as_str().parse::<i32>().map_err(|_| invalid())? - 1;

        Self::try_new(row, col).map_err(|_| invalid())
    }

    /// 칸 표기법으로 변환
    pub fn to_notation(&self) -> String {
        let letter = (b'a' + self.row as u8) as char;
        format!("{}{}", letter, self.col + 1)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_notation())
    }
}

/// 칸의 내용물. `is_king`은 수비측 기물에만 의미가 있다
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Square {
    pub occupant: Option<Side>,
    pub is_king: bool,
}

impl Square {
    pub const EMPTY: Square = Square { occupant: None, is_king: false };

    pub const fn piece(side: Side) -> Self {
        Self { occupant: Some(side), is_king: false }
    }

    pub const fn king() -> Self {
        Self { occupant: Some(Side::Defender), is_king: true }
    }

    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }

    pub fn side(&self) -> Option<Side> {
        self.occupant
    }

    pub fn belongs_to(&self, side: Side) -> bool {
        self.occupant == Some(side)
    }

    pub fn is_enemy_of(&self, side: Side) -> bool {
        matches!(self.occupant, Some(s) if s != side)
    }
}

/// 13x13 보드
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [[Square; SIZE]; SIZE],
}

impl Board {
    pub fn empty() -> Self {
        Self {
            squares: [[Square::EMPTY; SIZE]; SIZE],
        }
    }

    /// 초기 배치: 공격 24, 수비 12 + 왕
    pub fn initial() -> Self {
        let mut board = Self::empty();
        for &(row, col) in ATTACKER_START.iter() {
            board.place(Coord::new(row, col), Square::piece(Side::Attacker));
        }
        for &(row, col) in DEFENDER_START.iter() {
            board.place(Coord::new(row, col), Square::piece(Side::Defender));
        }
        board.place(THRONE, Square::king());
        board
    }

    fn index(coord: Coord) -> (usize, usize) {
        assert!(coord.is_valid(), "보드 범위를 벗어난 좌표입니다: ({}, {})", coord.row, coord.col);
        (coord.row as usize, coord.col as usize)
    }

    fn set(&mut self, coord: Coord, square: Square) {
        let (row, col) = Self::index(coord);
        self.squares[row][col] = square;
    }

    /// 칸 조회 (범위 밖이면 에러)
    pub fn at(&self, coord: Coord) -> Result<Square, BoardError> {
        self.get(coord).ok_or(BoardError::OutOfBounds {
            row: coord.row,
            col: coord.col,
        })
    }

    /// 탐색용 조회: 보드 밖이면 None
    pub fn get(&self, coord: Coord) -> Option<Square> {
        if coord.is_valid() {
            Some(self.squares[coord.row as usize][coord.col as usize])
        } else {
            None
        }
    }

    /// 범위 밖 좌표는 호출자 버그로 간주하고 패닉
    pub(crate) fn square(&self, coord: Coord) -> Square {
        let (row, col) = Self::index(coord);
        self.squares[row][col]
    }

    /// 배치 (초기화/실험용 포지션 구성에만 사용)
    pub fn place(&mut self, coord: Coord, square: Square) {
        if square.is_king {
            assert!(
                square.belongs_to(Side::Defender),
                "왕은 수비측 기물이어야 합니다"
            );
            if let Some(king) = self.king_position() {
                assert_eq!(king, coord, "왕은 보드에 하나만 있을 수 있습니다");
            }
        }
        self.set(coord, square);
    }

    /// 기물 이동. `from`은 기물이 있고 `to`는 비어 있어야 한다
    pub fn relocate(&mut self, from: Coord, to: Coord) {
        let moving = self.square(from);
        assert!(!moving.is_empty(), "빈 칸({})의 기물은 옮길 수 없습니다", from);
        assert!(self.square(to).is_empty(), "이미 기물이 있는 칸({})으로 옮길 수 없습니다", to);

        self.set(to, moving);
        self.set(from, Square::EMPTY);
    }

    /// 칸 비우기 (캡처 제거)
    pub fn clear(&mut self, coord: Coord) {
        self.set(coord, Square::EMPTY);
    }

    pub fn is_corner(coord: Coord) -> bool {
        coord.is_corner()
    }

    pub fn is_throne(coord: Coord) -> bool {
        coord.is_throne()
    }

    pub fn king_position(&self) -> Option<Coord> {
        self.pieces()
            .find(|(_, square)| square.is_king)
            .map(|(coord, _)| coord)
    }

    /// 해당 진영의 기물 수 (왕 포함)
    pub fn count(&self, side: Side) -> usize {
        self.pieces().filter(|(_, square)| square.belongs_to(side)).count()
    }

    /// 모든 칸 (행 우선)
    pub fn squares(&self) -> impl Iterator<Item = (Coord, Square)> + '_ {
        (0..BOARD_SIZE).flat_map(move |row| {
            (0..BOARD_SIZE).map(move |col| {
                let coord = Coord::new(row, col);
                (coord, self.square(coord))
            })
        })
    }

    /// 기물이 있는 칸만
    pub fn pieces(&self) -> impl Iterator<Item = (Coord, Square)> + '_ {
        self.squares().filter(|(_, square)| !square.is_empty())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for col in 1..=BOARD_SIZE {
            write!(f, "{:>3}", col)?;
        }
        writeln!(f)?;

        for row in 0..BOARD_SIZE {
            write!(f, " {}", (b'a' + row as u8) as char)?;
            for col in 0..BOARD_SIZE {
                let coord = Coord::new(row, col);
                let square = self.square(coord);
                let symbol = match square.occupant {
                    Some(Side::Attacker) => 'A',
                    Some(Side::Defender) if square.is_king => 'K',
                    Some(Side::Defender) => 'D',
                    None if coord.is_corner() => '+',
                    None if coord.is_throne() => '#',
                    None => '.',
                };
                write!(f, "{:>3}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
