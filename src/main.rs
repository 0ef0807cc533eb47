use game_2048::engine::Game;

fn main() {
    let mut game = Game::new();
    println!("{}", game.grid());
    let mut move_count = 0u32;
    while game.can_move() {
        let direction = game.auto_move();
        move_count += 1;
        println!("move {move_count}: {direction:?}");
        println!("{}", game.grid());
    }
    println!(
        "Game over. Moves: {}, score: {}, max tile: {}",
        move_count,
        game.score(),
        game.max_tile()
    );
}
