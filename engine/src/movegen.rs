use crate::board::{Board, Coord, Direction};

/// 룩처럼 직선으로 미끄러지는 도착 칸 목록.
///
/// 네 방향(아래, 위, 왼쪽, 오른쪽)으로 빈 칸이 이어지는 동안 모으고,
/// 기물이나 보드 끝을 만나면 그 방향은 끝난다. 막는 칸 자체는 포함하지 않는다.
/// 귀퉁이 제한은 여기서 걸러내지 않는다 (`GameState::legal_destinations` 참고).
pub fn sliding_destinations(board: &Board, from: Coord) -> Vec<Coord> {
    let mut destinations = Vec::new();

    for dir in Direction::ALL {
        let mut distance = 1;
        loop {
            let target = from.step(dir, distance);
            match board.get(target) {
                Some(square) if square.is_empty() => destinations.push(target),
                _ => break,
            }
            distance += 1;
        }
    }

    destinations
}
