use crate::board::{Board, Coord, Direction, Side};

/// 한 수에 대한 캡처 판정 결과
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptureReport {
    /// 제거될 칸들
    pub captured: Vec<Coord>,
    /// 왕이 귀퉁이에 도달
    pub king_escaped: bool,
    /// 왕이 사방으로 포위됨
    pub king_captured: bool,
}

impl CaptureReport {
    pub fn winner(&self) -> Option<Side> {
        if self.king_escaped {
            Some(Side::Defender)
        } else if self.king_captured {
            Some(Side::Attacker)
        } else {
            None
        }
    }
}

/// 이동 직후의 보드에서 `dest`로 온 기물이 일으키는 캡처와 승리 조건을 판정한다.
///
/// 보드는 읽기만 한다. 제거는 호출자(`GameState`)가 `captured`를 보고 적용한다.
/// - 왕이 귀퉁이에 도착하면 다른 판정 없이 탈출로 끝난다.
/// - 연쇄 캡처와 단일 협공 캡처는 같은 보드에서 방향마다 따로 계산한다.
///   한 방향에서 둘은 동시에 성립할 수 없다 (협공은 적 1개, 연쇄는 2개 이상).
/// - 움직인 기물 자신은 절대 제거되지 않는다.
pub fn resolve_captures(board: &Board, dest: Coord) -> CaptureReport {
    let mover = match board.get(dest) {
        Some(square) => square,
        None => return CaptureReport::default(),
    };
    let side = match mover.side() {
        Some(side) => side,
        None => return CaptureReport::default(),
    };

    if mover.is_king && dest.is_corner() {
        return CaptureReport {
            king_escaped: true,
            ..CaptureReport::default()
        };
    }

    let mut captured = Vec::new();
    for dir in Direction::ALL {
        captured.extend(chain_capture(board, dest, side, dir));
        captured.extend(custodial_capture(board, dest, side, dir));
    }

    let king_captured = side == Side::Attacker
        && adjacent_king(board, dest).map_or(false, |king| is_king_surrounded(board, king));

    CaptureReport {
        captured,
        king_escaped: false,
        king_captured,
    }
}

/// `side`에게 적대적인 칸: 상대 기물이 있거나 귀퉁이
fn is_hostile_to(board: &Board, coord: Coord, side: Side) -> bool {
    match board.get(coord) {
        Some(square) => square.is_enemy_of(side) || coord.is_corner(),
        None => false,
    }
}

/// 단일 협공: 바로 옆 적(왕 제외)의 반대편이 그 적에게 적대적이면 제거
fn custodial_capture(board: &Board, dest: Coord, side: Side, dir: Direction) -> Option<Coord> {
    let adjacent = dest.step(dir, 1);
    let victim = board.get(adjacent)?;
    if !victim.is_enemy_of(side) || victim.is_king {
        return None;
    }

    let beyond = dest.step(dir, 2);
    if is_hostile_to(board, beyond, side.opponent()) {
        Some(adjacent)
    } else {
        None
    }
}

/// 연쇄 캡처: 한 줄로 이어진 적 2개 이상이 반대편에서 막히고,
/// 모든 기물의 양옆(줄에 수직)을 아군이 막고 있으면 줄 전체를 제거
fn chain_capture(board: &Board, dest: Coord, side: Side, dir: Direction) -> Vec<Coord> {
    let enemy = side.opponent();
    let mut run = Vec::new();

    let mut distance = 1;
    loop {
        let coord = dest.step(dir, distance);
        let square = match board.get(coord) {
            Some(square) => square,
            None => return Vec::new(),
        };
        if is_hostile_to(board, coord, enemy) {
            break;
        }
        if !square.belongs_to(enemy) || square.is_king {
            return Vec::new();
        }
        run.push(coord);
        distance += 1;
    }

    if run.len() < 2 {
        return Vec::new();
    }

    let walled = run.iter().all(|&member| {
        dir.perpendicular().iter().all(|&wall_dir| {
            board
                .get(member.step(wall_dir, 1))
                .map_or(false, |square| square.belongs_to(side))
        })
    });

    if walled {
        run
    } else {
        Vec::new()
    }
}

/// `coord`에 붙어 있는 왕의 위치
fn adjacent_king(board: &Board, coord: Coord) -> Option<Coord> {
    Direction::ALL
        .iter()
        .map(|&dir| coord.step(dir, 1))
        .find(|&neighbor| board.get(neighbor).map_or(false, |square| square.is_king))
}

/// 사방이 공격측 기물이거나 보드 끝이면 포위.
/// 보드 안의 빈 칸(빈 귀퉁이 포함)이나 수비측 기물이 하나라도 있으면 빠져나갈 틈이 있다.
fn is_king_surrounded(board: &Board, king: Coord) -> bool {
    Direction::ALL.iter().all(|&dir| match board.get(king.step(dir, 1)) {
        Some(square) => square.belongs_to(Side::Attacker),
        None => true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Square;

    fn board_with(attackers: &[(i32, i32)], defenders: &[(i32, i32)], king: Option<(i32, i32)>) -> Board {
        let mut board = Board::empty();
        for &(row, col) in attackers {
            board.place(Coord::new(row, col), Square::piece(Side::Attacker));
        }
        for &(row, col) in defenders {
            board.place(Coord::new(row, col), Square::piece(Side::Defender));
        }
        if let Some((row, col)) = king {
            board.place(Coord::new(row, col), Square::king());
        }
        board
    }

    #[test]
    fn test_custodial_capture() {
        // (7,6)에 막 도착한 공격측이 (6,6) 수비측을 (5,6)과 함께 협공
        let board = board_with(&[(5, 6), (7, 6)], &[(6, 6)], Some((10, 10)));
        let report = resolve_captures(&board, Coord::new(7, 6));

        assert_eq!(report.captured, vec![Coord::new(6, 6)]);
        assert_eq!(report.winner(), None);
    }

    #[test]
    fn test_corner_is_hostile() {
        let board = board_with(&[(0, 2)], &[(0, 1)], Some((8, 8)));
        let report = resolve_captures(&board, Coord::new(0, 2));
        assert_eq!(report.captured, vec![Coord::new(0, 1)]);

        // 수비측도 귀퉁이를 이용할 수 있음
        let board = board_with(&[(11, 12)], &[(10, 12)], Some((8, 8)));
        let report = resolve_captures(&board, Coord::new(10, 12));
        assert_eq!(report.captured, vec![Coord::new(11, 12)]);
    }

    #[test]
    fn test_king_is_anvil() {
        // 왕도 협공에 참여한다
        let board = board_with(&[(5, 6)], &[(5, 7)], Some((5, 5)));
        let report = resolve_captures(&board, Coord::new(5, 7));
        assert_eq!(report.captured, vec![Coord::new(5, 6)]);
    }

    #[test]
    fn test_king_not_removed_by_custodial() {
        let board = board_with(&[(5, 6), (7, 6)], &[], Some((6, 6)));
        let report = resolve_captures(&board, Coord::new(7, 6));

        assert!(report.captured.is_empty());
        assert!(!report.king_captured);
    }

    #[test]
    fn test_no_suicide() {
        // 두 공격측 사이로 들어간 수비측은 살아남는다
        let board = board_with(&[(3, 4), (3, 6)], &[(3, 5)], Some((9, 9)));
        let report = resolve_captures(&board, Coord::new(3, 5));
        assert!(report.captured.is_empty());
        assert_eq!(report.winner(), None);
    }

    #[test]
    fn test_beyond_edge_is_not_hostile() {
        let board = board_with(&[(1, 4)], &[(0, 4)], Some((9, 9)));
        let report = resolve_captures(&board, Coord::new(1, 4));
        assert!(report.captured.is_empty());
    }

    #[test]
    fn test_chain_capture() {
        let board = board_with(
            &[(4, 2), (4, 6), (3, 3), (3, 4), (3, 5), (5, 3), (5, 4), (5, 5)],
            &[(4, 3), (4, 4), (4, 5)],
            Some((10, 10)),
        );
        let report = resolve_captures(&board, Coord::new(4, 2));
        assert_eq!(
            report.captured,
            vec![Coord::new(4, 3), Coord::new(4, 4), Coord::new(4, 5)]
        );
    }

    #[test]
    fn test_chain_capture_vertical() {
        let board = board_with(
            &[(9, 9), (6, 9), (7, 8), (8, 8), (7, 10), (8, 10)],
            &[(7, 9), (8, 9)],
            Some((1, 1)),
        );
        let report = resolve_captures(&board, Coord::new(9, 9));
        assert_eq!(report.captured, vec![Coord::new(8, 9), Coord::new(7, 9)]);
    }

    #[test]
    fn test_chain_next_to_edge() {
        let board = board_with(
            &[(0, 3), (1, 1), (1, 2)],
            &[(0, 1), (0, 2)],
            Some((6, 6)),
        );
        // 0행 위쪽은 보드 밖이므로 벽 조건을 채울 수 없음
        let report = resolve_captures(&board, Coord::new(0, 3));
        assert!(report.captured.is_empty());

        let board = board_with(
            &[(3, 0), (1, 1), (2, 1)],
            &[(1, 0), (2, 0)],
            Some((6, 6)),
        );
        // 0열도 마찬가지
        let report = resolve_captures(&board, Coord::new(3, 0));
        assert!(report.captured.is_empty());

        let board = board_with(
            &[(1, 4), (1, 1), (0, 2), (0, 3), (2, 2), (2, 3)],
            &[(1, 2), (1, 3)],
            Some((6, 6)),
        );
        // 한 칸 안쪽 줄은 양옆을 막을 수 있음
        let report = resolve_captures(&board, Coord::new(1, 4));
        assert_eq!(report.captured, vec![Coord::new(1, 3), Coord::new(1, 2)]);
    }

    #[test]
    fn test_chain_needs_full_wall() {
        let board = board_with(
            &[(4, 2), (4, 6), (3, 3), (3, 4), (3, 5), (5, 3), (5, 5)],
            &[(4, 3), (4, 4), (4, 5)],
            Some((10, 10)),
        );
        let report = resolve_captures(&board, Coord::new(4, 2));
        assert!(report.captured.is_empty());
    }

    #[test]
    fn test_chain_open_end() {
        let board = board_with(
            &[(4, 2), (3, 3), (3, 4), (5, 3), (5, 4)],
            &[(4, 3), (4, 4)],
            Some((10, 10)),
        );
        let report = resolve_captures(&board, Coord::new(4, 2));
        assert!(report.captured.is_empty());
    }

    #[test]
    fn test_chain_with_king_is_not_captured() {
        let board = board_with(
            &[(4, 2), (4, 5), (3, 3), (3, 4), (5, 3), (5, 4)],
            &[(4, 3)],
            Some((4, 4)),
        );
        let report = resolve_captures(&board, Coord::new(4, 2));
        assert!(report.captured.is_empty());
        assert!(!report.king_captured);
    }

    #[test]
    fn test_chain_and_custodial_together() {
        let board = board_with(
            &[(4, 2), (4, 6), (3, 3), (3, 4), (3, 5), (5, 3), (5, 4), (5, 5), (2, 2)],
            &[(4, 3), (4, 4), (4, 5), (3, 2)],
            Some((10, 10)),
        );
        let report = resolve_captures(&board, Coord::new(4, 2));

        let mut captured = report.captured.clone();
        captured.sort();
        assert_eq!(
            captured,
            vec![Coord::new(3, 2), Coord::new(4, 3), Coord::new(4, 4), Coord::new(4, 5)]
        );
    }

    #[test]
    fn test_king_escape() {
        let board = board_with(&[(0, 1)], &[], Some((0, 0)));
        let report = resolve_captures(&board, Coord::new(0, 0));

        assert!(report.king_escaped);
        assert!(report.captured.is_empty());
        assert_eq!(report.winner(), Some(Side::Defender));
    }

    #[test]
    fn test_king_surrounded() {
        let board = board_with(&[(5, 6), (7, 6), (6, 5), (6, 7)], &[], Some((6, 6)));
        let report = resolve_captures(&board, Coord::new(6, 7));

        assert!(report.king_captured);
        assert_eq!(report.winner(), Some(Side::Attacker));
    }

    #[test]
    fn test_king_against_edge() {
        let board = board_with(&[(0, 5), (1, 6), (0, 7)], &[], Some((0, 6)));
        let report = resolve_captures(&board, Coord::new(0, 7));
        assert!(report.king_captured);
    }

    #[test]
    fn test_king_with_gap_survives() {
        let board = board_with(&[(5, 6), (7, 6), (6, 7)], &[], Some((6, 6)));
        let report = resolve_captures(&board, Coord::new(6, 7));
        assert!(!report.king_captured);

        // 수비측 기물이 붙어 있어도 포위가 아니다
        let board = board_with(&[(5, 6), (7, 6), (6, 7)], &[(6, 5)], Some((6, 6)));
        let report = resolve_captures(&board, Coord::new(6, 7));
        assert!(!report.king_captured);

        // 빈 귀퉁이는 틈이다
        let board = board_with(&[(1, 1), (0, 2)], &[], Some((0, 1)));
        let report = resolve_captures(&board, Coord::new(0, 2));
        assert!(!report.king_captured);
    }

    #[test]
    fn test_defender_move_never_kills_king() {
        let board = board_with(&[(5, 6), (7, 6), (6, 5)], &[(6, 7)], Some((6, 6)));
        let report = resolve_captures(&board, Coord::new(6, 7));
        assert!(!report.king_captured);
    }
}
