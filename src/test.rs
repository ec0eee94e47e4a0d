#[cfg(test)]
pub mod test {
    use anyhow::Result;

    use std::time::Duration;

    use crate::arena::{self, Outcome};
    use crate::board::{Board, Cell, Player};
    use crate::codec;
    use crate::config::{GameConfig, SearchConfig, Weights};
    use crate::error::Error;
    use crate::heuristic::{center_distance, CenterEvaluator, Evaluator, LineEvaluator, PatternEvaluator};
    use crate::search::{self, AlphaBeta, IterativeDeepening, Minimax, Negamax, SearchNode, Strategy};
    use crate::successors::successors;

    const E: Cell = Cell::Empty;
    const X: Cell = Cell::PlayerOne;
    const O: Cell = Cell::PlayerTwo;

    /// Every position reachable in up to `plies` moves, the start included
    fn positions(board: &Board, plies: usize) -> Vec<Board> {
        (0..=plies).flat_map(|p| arena::openings(board, p)).collect()
    }

    fn changed_cells(a: &Board, b: &Board) -> usize {
        a.to_grid()
            .iter()
            .flatten()
            .zip(b.to_grid().iter().flatten())
            .filter(|(x, y)| x != y)
            .count()
    }

    /// Weights with every feature switched off
    fn silent_weights() -> Weights {
        Weights {
            win: 0.0,
            threat_block: 0.0,
            center: 0.0,
            run_base: 1.0,
            density: [0.0; 3],
            gap: 0.0,
            block: 0.0,
            aggression: 1.0,
            opponent_damping: 1.0,
        }
    }

    // ---------------------------------------------------------------------
    // board
    // ---------------------------------------------------------------------

    #[test]
    pub fn drop_token_fills_one_slot_and_toggles_player() -> Result<()> {
        let start = Board::new(4, 4, 3)?;
        for board in positions(&start, 3) {
            for column in board.free_columns() {
                let next = board.drop_token(column, board.player())?;
                assert_eq!(next.column_height(column), board.column_height(column) + 1);
                assert_eq!(next.player(), board.player().other());
                assert_eq!(next.num_moves(), board.num_moves() + 1);
                assert_eq!(changed_cells(&board, &next), 1);

                let row = board.column_height(column) as isize;
                assert_eq!(next.cell(row, column as isize), Some(board.player().token()));

                let lost_slot = next.column_height(column) == next.height();
                let expected = board.free_columns().len() - if lost_slot { 1 } else { 0 };
                assert_eq!(next.free_columns().len(), expected);
            }
        }
        Ok(())
    }

    #[test]
    pub fn drop_token_for_given_player() -> Result<()> {
        let board = Board::standard();
        let next = board.drop_token(2, Player::Two)?;
        assert_eq!(next.cell(0, 2), Some(Cell::PlayerTwo));
        assert_eq!(next.player(), Player::One);
        // the input board is untouched
        assert_eq!(board.cell(0, 2), Some(Cell::Empty));
        assert_eq!(board.num_moves(), 0);
        Ok(())
    }

    #[test]
    pub fn illegal_drops() -> Result<()> {
        let board = Board::from_moves("111111")?;
        assert_eq!(board.free_columns(), vec![1, 2, 3, 4, 5, 6]);
        assert!(matches!(board.play(0), Err(Error::IllegalMove { column: 0 })));
        assert!(matches!(
            board.play(7),
            Err(Error::ColumnOutOfRange { column: 7, width: 7 })
        ));
        Ok(())
    }

    #[test]
    pub fn move_strings() -> Result<()> {
        assert!(matches!(Board::from_moves("12a"), Err(Error::Parse { position: 2, .. })));
        assert!(matches!(Board::from_moves("0"), Err(Error::Parse { position: 0, .. })));
        assert!(matches!(Board::from_moves("8"), Err(Error::ColumnOutOfRange { .. })));
        // player one has already won vertically
        assert!(matches!(Board::from_moves("12121212"), Err(Error::Parse { position: 7, .. })));
        Ok(())
    }

    #[test]
    pub fn out_of_bounds_cells() {
        let board = Board::standard();
        assert_eq!(board.cell(-1, 0), None);
        assert_eq!(board.cell(0, -1), None);
        assert_eq!(board.cell(6, 0), None);
        assert_eq!(board.cell(0, 7), None);
        assert_eq!(board.cell(5, 6), Some(Cell::Empty));
    }

    #[test]
    pub fn vertical_and_horizontal_lines() -> Result<()> {
        let vertical = Board::from_moves("1212121")?;
        assert!(vertical.line_exists_at(0, 0, Player::One));
        assert!(!vertical.line_exists_at(1, 0, Player::One));
        assert!(vertical.is_win_for(Player::One));
        assert!(!vertical.is_win_for(Player::Two));
        assert_eq!(vertical.winner(), Some(Player::One));
        assert!(vertical.last_move_won());

        let horizontal = Board::from_moves("1122334")?;
        assert!(horizontal.line_exists_at(0, 0, Player::One));
        assert!(!horizontal.line_exists_at(1, 0, Player::Two));
        assert!(horizontal.is_win_for(Player::One));

        let open = Board::from_moves("112233")?;
        assert_eq!(open.winner(), None);
        assert!(open.is_winning_drop(3));
        assert!(!open.is_winning_drop(4));
        Ok(())
    }

    #[test]
    pub fn diagonal_lines() -> Result<()> {
        let rising = Board::from_grid(
            &[
                vec![X, O, O, E],
                vec![E, X, O, E],
                vec![E, E, X, E],
                vec![E, E, E, E],
            ],
            3,
            Player::Two,
        )?;
        assert!(rising.line_exists_at(0, 0, Player::One));
        assert!(rising.is_win_for(Player::One));
        assert!(!rising.is_win_for(Player::Two));

        let falling = Board::from_grid(
            &[
                vec![E, O, O, X],
                vec![E, O, X, E],
                vec![E, X, E, E],
                vec![E, E, E, E],
            ],
            3,
            Player::Two,
        )?;
        assert!(falling.line_exists_at(2, 1, Player::One));
        assert!(!falling.line_exists_at(0, 3, Player::One));
        assert!(falling.is_win_for(Player::One));
        Ok(())
    }

    #[test]
    pub fn full_board_is_a_draw() -> Result<()> {
        let full = Board::from_grid(&[vec![X, O, X], vec![O, X, O]], 3, Player::One)?;
        assert!(full.is_full());
        assert!(full.free_columns().is_empty());
        assert_eq!(full.winner(), None);
        Ok(())
    }

    #[test]
    pub fn invalid_dimensions() {
        assert!(matches!(Board::new(0, 6, 4), Err(Error::InvalidDimensions { .. })));
        assert!(matches!(Board::new(7, 6, 8), Err(Error::InvalidDimensions { .. })));
        assert!(matches!(Board::new(65, 6, 4), Err(Error::InvalidDimensions { .. })));
        assert!(matches!(Board::new(7, 6, 0), Err(Error::InvalidDimensions { .. })));
        assert!(Board::new(7, 6, 7).is_ok());
    }

    #[test]
    pub fn display() -> Result<()> {
        let board = Board::new(3, 2, 2)?.play_moves("12")?;
        assert_eq!(board.to_string(), "...\nXO.\n123");
        Ok(())
    }

    // ---------------------------------------------------------------------
    // grid and binary round trips
    // ---------------------------------------------------------------------

    #[test]
    pub fn grid_round_trip() -> Result<()> {
        let mut boards = positions(&Board::standard(), 2);
        boards.push(Board::from_moves("1212121")?);
        boards.push(Board::from_moves("1122334")?);

        for board in boards {
            let rebuilt = Board::from_grid(&board.to_grid(), board.win_length(), board.player())?;
            assert_eq!(rebuilt.free_columns(), board.free_columns());
            assert_eq!(rebuilt.is_win_for(Player::One), board.is_win_for(Player::One));
            assert_eq!(rebuilt.is_win_for(Player::Two), board.is_win_for(Player::Two));
            assert_eq!(rebuilt.num_moves(), board.num_moves());

            let decoded = codec::decode(&codec::encode(&board)?)?;
            assert_eq!(decoded.to_grid(), board.to_grid());
            assert_eq!(decoded.player(), board.player());
            assert_eq!(decoded.free_columns(), board.free_columns());
            assert_eq!(decoded.is_win_for(Player::One), board.is_win_for(Player::One));
        }
        Ok(())
    }

    #[test]
    pub fn encoding_layout() -> Result<()> {
        let board = Board::new(2, 2, 2)?.play_moves("2")?;
        assert_eq!(
            codec::encode(&board)?,
            vec![b'C', b'N', 1, 2, 2, 2, 2, 0, 1, 0, 0]
        );
        Ok(())
    }

    #[test]
    pub fn decoding_rejects_bad_input() -> Result<()> {
        let bytes = codec::encode(&Board::new(2, 2, 2)?)?;

        let mut bad_magic = bytes.clone();
        bad_magic[0] = b'X';
        assert!(matches!(codec::decode(&bad_magic), Err(Error::Decode(_))));

        let mut bad_cell = bytes.clone();
        bad_cell[7] = 3;
        assert!(matches!(codec::decode(&bad_cell), Err(Error::Decode(_))));

        // a token in the top row with nothing below it
        let mut floating = bytes.clone();
        floating[9] = 1;
        assert!(matches!(codec::decode(&floating), Err(Error::Decode(_))));

        let mut trailing = bytes.clone();
        trailing.push(0);
        assert!(matches!(codec::decode(&trailing), Err(Error::Decode(_))));

        assert!(matches!(codec::decode(&bytes[..5]), Err(Error::Io(_))));
        Ok(())
    }

    // ---------------------------------------------------------------------
    // successors
    // ---------------------------------------------------------------------

    #[test]
    pub fn successors_match_free_columns() -> Result<()> {
        for board in positions(&Board::new(4, 3, 3)?, 3) {
            let children = successors(&board);
            assert_eq!(children.len(), board.free_columns().len());

            let columns: Vec<usize> = children.iter().map(|s| s.column).collect();
            assert_eq!(columns, board.free_columns());

            for child in children {
                assert_eq!(changed_cells(&board, &child.board), 1);
                assert_eq!(child.board.last_move(), Some(child.column));
            }
        }
        Ok(())
    }

    #[test]
    pub fn no_successors_of_full_board() -> Result<()> {
        let full = Board::from_grid(&[vec![X, O, X], vec![O, X, O]], 3, Player::One)?;
        assert!(successors(&full).is_empty());
        Ok(())
    }

    // ---------------------------------------------------------------------
    // heuristic
    // ---------------------------------------------------------------------

    #[test]
    pub fn center_bias_on_empty_board() -> Result<()> {
        let board = Board::standard();
        let evaluators: Vec<Box<dyn Evaluator>> = vec![
            Box::new(PatternEvaluator::default()),
            Box::new(CenterEvaluator::default()),
        ];
        for evaluator in evaluators {
            let score = |column: usize| -> Result<f64> {
                Ok(evaluator.evaluate(&board.play(column)?, column, Player::One))
            };
            assert!(score(3)? >= score(0)?);
            assert!(score(3)? >= score(6)?);
            assert!(score(3)? > score(2)?);
            assert_eq!(score(2)?, score(4)?);
        }
        assert_eq!(center_distance(7, 3), 0.0);
        assert_eq!(center_distance(6, 2), center_distance(6, 3));
        Ok(())
    }

    #[test]
    pub fn perspective_scaling() -> Result<()> {
        let evaluator = PatternEvaluator::default();
        let board = Board::standard().play(0)?;
        let raw = evaluator.raw_score(&board, 0);
        assert!(raw < 0.0);

        // the mover of the last token is player one
        assert_eq!(evaluator.evaluate(&board, 0, Player::One), raw * 1.01);
        assert_eq!(evaluator.evaluate(&board, 0, Player::Two), raw * -0.9);
        Ok(())
    }

    #[test]
    pub fn winning_move_dominates() -> Result<()> {
        let board = Board::from_moves("112233")?;
        let evaluator = PatternEvaluator::default();
        let win = board.play(3)?;
        let other = board.play(4)?;

        let win_score = evaluator.evaluate(&win, 3, Player::One);
        assert!(win_score >= Weights::default().win);
        assert!(win_score > evaluator.evaluate(&other, 4, Player::One));
        // the same win seen from the opponent is catastrophic
        assert!(evaluator.evaluate(&win, 3, Player::Two) <= -0.9 * Weights::default().win);
        Ok(())
    }

    #[test]
    pub fn blocking_an_imminent_win() -> Result<()> {
        // player two holds the three leftmost bottom cells
        let board = Board::from_moves("717263")?;
        let evaluator = PatternEvaluator::default();

        let block = evaluator.raw_score(&board.play(3)?, 3);
        let elsewhere = evaluator.raw_score(&board.play(4)?, 4);
        assert!(block >= Weights::default().threat_block);
        assert!(elsewhere < Weights::default().threat_block);
        Ok(())
    }

    #[test]
    pub fn open_pair_is_a_threat() -> Result<()> {
        let evaluator = PatternEvaluator::new(Weights {
            threat_block: 1.0,
            ..silent_weights()
        });

        // player two holds the second and third bottom cells, the first is empty
        let open = Board::from_moves("7273")?.play(3)?;
        assert_eq!(evaluator.raw_score(&open, 3), 1.0);

        // the same pair already capped by player one on the far side
        let closed = Board::from_moves("1273")?.play(3)?;
        assert_eq!(evaluator.raw_score(&closed, 3), 0.0);

        // no threat without a pair next to the token
        let away = Board::from_moves("7273")?.play(4)?;
        assert_eq!(evaluator.raw_score(&away, 4), 0.0);
        Ok(())
    }

    /// A 19 x 19 board with a win length of 10 on which player one can win
    /// by dropping into one of several columns, while column 8 is a
    /// non-winning drop with runs of 8 along three axes
    fn long_run_board() -> Result<Board> {
        let (width, height) = (19, 19);
        let mut grid = vec![vec![E; width]; height];
        for (row, cells) in grid.iter_mut().enumerate().take(8) {
            for (col, cell) in cells.iter_mut().enumerate() {
                *cell = if (row + col) % 2 == 0 { X } else { O };
            }
        }
        for col in (4..8).chain(9..13) {
            grid[8][col] = X;
        }
        for row in grid.iter_mut().take(9) {
            row[18] = X;
        }
        Ok(Board::from_grid(&grid, 10, Player::One)?)
    }

    #[test]
    pub fn win_dominates_on_long_lines() -> Result<()> {
        let board = long_run_board()?;
        let non_winning = board.play(8)?;
        assert!(!non_winning.last_move_won());
        let win = board.play(18)?;
        assert!(win.last_move_won());

        let pattern = PatternEvaluator::default();
        let line = LineEvaluator::default();
        assert!(pattern.raw_score(&non_winning, 8) > Weights::default().win);
        assert!(pattern.raw_score(&win, 18) > pattern.raw_score(&non_winning, 8));
        assert!(line.evaluate(&win, 18, Player::One) > line.evaluate(&non_winning, 8, Player::One));

        let evaluators: Vec<Box<dyn Evaluator>> =
            vec![Box::new(pattern), Box::new(CenterEvaluator::default()), Box::new(line)];
        for evaluator in evaluators {
            let column = AlphaBeta::new(evaluator, 1).choose_move(&board)?;
            assert!(board.play(column)?.last_move_won(), "chose column {}", column);
        }
        Ok(())
    }

    #[test]
    pub fn line_scores_accumulate_to_position_scores() -> Result<()> {
        let evaluator = LineEvaluator::default();
        for board in positions(&Board::new(5, 4, 3)?, 3) {
            let root = board.player();
            let before = evaluator.position_score(&board, root);
            for successor in successors(&board) {
                let after = evaluator.position_score(&successor.board, root);
                let local = evaluator.evaluate(&successor.board, successor.column, root);
                assert!((after - before - local).abs() < 1e-6, "column {} on\n{}", successor.column, board);
            }
        }
        assert_eq!(evaluator.position_score(&Board::standard(), Player::One), 0.0);
        Ok(())
    }

    #[test]
    pub fn line_windows() -> Result<()> {
        let evaluator = LineEvaluator::new(Weights {
            run_base: 2.0,
            ..silent_weights()
        });
        // a corner token on 3 x 3 with n = 3 sits in its row, its column and
        // the main diagonal
        let board = Board::new(3, 3, 3)?.play(0)?;
        assert_eq!(evaluator.position_score(&board, Player::One), 3.0);
        assert_eq!(evaluator.position_score(&board, Player::Two), -3.0);

        // the reply kills the bottom row and opens column 1 for player two
        let mixed = board.play(1)?;
        assert_eq!(evaluator.evaluate(&mixed, 1, Player::One), -1.0 - 1.0);
        Ok(())
    }

    #[test]
    pub fn gap_feature() -> Result<()> {
        // X _ X X with the leftmost X just played
        let board = Board::from_moves("37471")?;
        let evaluator = PatternEvaluator::new(Weights {
            gap: 1.0,
            ..silent_weights()
        });
        assert_eq!(evaluator.raw_score(&board, 0), 3.0);
        Ok(())
    }

    #[test]
    pub fn run_and_density_features() -> Result<()> {
        // X X X with the rightmost X just played
        let board = Board::from_moves("17273")?;

        let runs = PatternEvaluator::new(Weights {
            run_base: 2.0,
            ..silent_weights()
        });
        assert_eq!(runs.raw_score(&board, 2), 3.0);

        let density = PatternEvaluator::new(Weights {
            density: [1.0, 0.0, 0.0],
            ..silent_weights()
        });
        assert_eq!(density.raw_score(&board, 2), 1.0);

        let wide_density = PatternEvaluator::new(Weights {
            density: [0.0, 1.0, 0.0],
            ..silent_weights()
        });
        assert_eq!(wide_density.raw_score(&board, 2), 2.0);
        Ok(())
    }

    #[test]
    pub fn blocking_length_feature() -> Result<()> {
        // only player one's own token is adjacent
        let board = Board::from_moves("2737")?.play(0)?;
        let evaluator = PatternEvaluator::new(Weights {
            block: 1.0,
            ..silent_weights()
        });
        assert_eq!(evaluator.raw_score(&board, 0), 0.0);

        // player one drops next to two of player two's tokens
        let board = Board::from_moves("7172")?.play(2)?;
        assert_eq!(evaluator.raw_score(&board, 2), 2.0);
        Ok(())
    }

    #[test]
    pub fn node_scores_accumulate() -> Result<()> {
        let evaluator = PatternEvaluator::default();
        let board = Board::from_moves("4453")?;
        let root_player = board.player();
        let parent = SearchNode::with_baseline(board.clone(), Some(2), 12.5);

        for successor in successors(&board) {
            let local = evaluator.evaluate(&successor.board, successor.column, root_player);
            let child = parent.child(successor.clone(), &evaluator, root_player);
            assert_eq!(child.score, 12.5 + local);
            assert_eq!(child.column, Some(successor.column));

            for grandchild in child.children(&evaluator, root_player) {
                let column = grandchild.column.unwrap_or_default();
                let local = evaluator.evaluate(&grandchild.board, column, root_player);
                assert_eq!(grandchild.score, child.score + local);
            }
        }
        Ok(())
    }

    // ---------------------------------------------------------------------
    // search
    // ---------------------------------------------------------------------

    #[test]
    pub fn pruning_preserves_scores() -> Result<()> {
        let mut boards = positions(&Board::new(5, 4, 3)?, 2);
        boards.extend(arena::openings(&Board::standard(), 2));

        for board in boards {
            if board.free_columns().is_empty() {
                continue;
            }
            let max_depth = if board.width() == 5 { 4 } else { 3 };
            for depth in 1..=max_depth {
                let mut minimax = Minimax::new(PatternEvaluator::default(), depth);
                let mut alpha_beta = AlphaBeta::new(PatternEvaluator::default(), depth);
                let mut negamax = Negamax::new(PatternEvaluator::default(), depth);

                let reference = minimax.search(&board)?;
                let pruned = alpha_beta.search(&board)?;
                let negated = negamax.search(&board)?;

                assert_eq!(pruned.score, reference.score, "depth {} on\n{}", depth, board);
                assert_eq!(negated.score, reference.score, "depth {} on\n{}", depth, board);
                assert_eq!(negated.path, pruned.path);
                assert!(alpha_beta.node_count <= minimax.node_count);
            }
        }
        Ok(())
    }

    #[test]
    pub fn takes_the_win() -> Result<()> {
        let board = Board::from_moves("112233")?;
        for depth in 1..=4 {
            let mut agent = AlphaBeta::new(PatternEvaluator::default(), depth);
            assert_eq!(agent.choose_move(&board)?, 3, "depth {}", depth);
            let mut agent = Negamax::new(PatternEvaluator::default(), depth);
            assert_eq!(agent.choose_move(&board)?, 3, "depth {}", depth);
            let mut agent = AlphaBeta::new(LineEvaluator::default(), depth);
            assert_eq!(agent.choose_move(&board)?, 3, "depth {}", depth);
        }
        Ok(())
    }

    #[test]
    pub fn blocks_the_opponent() -> Result<()> {
        let board = Board::from_moves("717263")?;
        for depth in 2..=4 {
            let mut agent = AlphaBeta::new(PatternEvaluator::default(), depth);
            assert_eq!(agent.choose_move(&board)?, 3, "depth {}", depth);
        }
        Ok(())
    }

    #[test]
    pub fn center_opening() -> Result<()> {
        let board = Board::standard();
        let mut agent = AlphaBeta::new(PatternEvaluator::default(), 1);
        assert_eq!(agent.choose_move(&board)?, 3);
        let mut agent = AlphaBeta::new(CenterEvaluator::default(), 1);
        assert_eq!(agent.choose_move(&board)?, 3);
        Ok(())
    }

    #[test]
    pub fn repeated_searches_agree() -> Result<()> {
        let board = Board::from_moves("4435")?;
        let mut agent = AlphaBeta::new(PatternEvaluator::default(), 4);
        let first = agent.choose_move(&board)?;
        assert_eq!(agent.choose_move(&board)?, first);
        assert_eq!(AlphaBeta::new(PatternEvaluator::default(), 4).choose_move(&board)?, first);
        Ok(())
    }

    #[test]
    pub fn path_starts_with_chosen_move() -> Result<()> {
        let board = Board::from_moves("44")?;
        let mut agent = AlphaBeta::new(PatternEvaluator::default(), 3);
        let result = agent.search(&board)?;
        assert_eq!(result.path.len(), 3);
        assert!(board.free_columns().contains(&result.path[0]));
        assert_eq!(result.best_move(), Some(result.path[0]));
        Ok(())
    }

    #[test]
    pub fn search_errors() -> Result<()> {
        let full = Board::from_grid(&[vec![X, O, X], vec![O, X, O]], 3, Player::One)?;
        let mut agent = AlphaBeta::new(PatternEvaluator::default(), 3);
        assert!(matches!(agent.choose_move(&full), Err(Error::NoLegalMove)));

        let mut shallow = AlphaBeta::new(PatternEvaluator::default(), 0);
        assert!(matches!(shallow.choose_move(&Board::standard()), Err(Error::InvalidDepth)));
        Ok(())
    }

    #[test]
    pub fn depth_beyond_remaining_cells() -> Result<()> {
        let board = Board::from_grid(&[vec![X, O, X], vec![O, X, E]], 3, Player::Two)?;
        let mut agent = AlphaBeta::new(PatternEvaluator::default(), 10);
        let result = agent.search(&board)?;
        assert_eq!(result.path, vec![2]);

        let empty = Board::new(3, 2, 3)?;
        let mut agent = Minimax::new(PatternEvaluator::default(), 10);
        let column = agent.choose_move(&empty)?;
        assert!(empty.free_columns().contains(&column));
        Ok(())
    }

    #[test]
    pub fn decided_root_still_gets_a_move() -> Result<()> {
        let won = Board::from_moves("1212121")?;
        let mut agent = AlphaBeta::new(PatternEvaluator::default(), 2);
        let column = agent.choose_move(&won)?;
        assert!(won.free_columns().contains(&column));
        Ok(())
    }

    #[test]
    pub fn iterative_deepening() -> Result<()> {
        let board = Board::from_moves("4435")?;

        let mut rushed = IterativeDeepening::new(PatternEvaluator::default(), 6, Duration::from_secs(0));
        let column = rushed.choose_move(&board)?;
        assert_eq!(rushed.completed_depth, 1);
        assert_eq!(column, AlphaBeta::new(PatternEvaluator::default(), 1).choose_move(&board)?);

        let mut patient = IterativeDeepening::new(PatternEvaluator::default(), 3, Duration::from_secs(600));
        let result = patient.search(&board)?;
        assert_eq!(patient.completed_depth, 3);
        assert_eq!(result, AlphaBeta::new(PatternEvaluator::default(), 3).search(&board)?);
        Ok(())
    }

    #[test]
    pub fn strategies_from_config() -> Result<()> {
        let config = SearchConfig::default();
        assert_eq!(search::from_config(PatternEvaluator::default(), &config).name(), "alpha-beta");

        let timed = SearchConfig {
            time_limit: Some(Duration::from_millis(50)),
            ..config
        };
        let mut strategy = search::from_config(CenterEvaluator::default(), &timed);
        assert_eq!(strategy.name(), "iterative-deepening");
        assert!(Board::standard().playable(strategy.choose_move(&Board::standard())?));
        Ok(())
    }

    // ---------------------------------------------------------------------
    // arena
    // ---------------------------------------------------------------------

    struct LeftmostColumn;

    impl Strategy for LeftmostColumn {
        fn choose_move(&mut self, _board: &Board) -> crate::Result<usize> {
            Ok(0)
        }

        fn name(&self) -> &str {
            "leftmost"
        }
    }

    #[test]
    pub fn games_run_to_completion() -> Result<()> {
        let mut first = AlphaBeta::new(PatternEvaluator::default(), 3);
        let mut second = AlphaBeta::new(CenterEvaluator::default(), 1);
        let outcome = arena::play_game(&mut first, &mut second, Board::new(4, 4, 3)?)?;
        assert!(matches!(outcome, Outcome::Win(_) | Outcome::Draw));

        // column 0 is full after two moves
        let outcome = arena::play_game(&mut LeftmostColumn, &mut LeftmostColumn, Board::new(2, 2, 2)?);
        assert!(matches!(outcome, Err(Error::IllegalMove { column: 0 })));
        Ok(())
    }

    #[test]
    pub fn opening_enumeration() -> Result<()> {
        let board = Board::standard();
        assert_eq!(arena::openings(&board, 0).len(), 1);
        assert_eq!(arena::openings(&board, 1).len(), 7);
        assert_eq!(arena::openings(&board, 2).len(), 49);
        assert!(arena::openings(&Board::new(2, 1, 2)?, 2).is_empty());
        Ok(())
    }

    #[test]
    pub fn matches_play_both_sides() -> Result<()> {
        let board = Board::new(4, 4, 3)?;
        let tally = arena::run_match(
            &board,
            1,
            || Box::new(AlphaBeta::new(PatternEvaluator::default(), 2)) as Box<dyn Strategy>,
            || Box::new(AlphaBeta::new(CenterEvaluator::default(), 1)) as Box<dyn Strategy>,
            false,
        )?;
        assert_eq!(tally.games(), 8);

        let tally = arena::run_match(
            &board,
            1,
            || Box::new(AlphaBeta::new(LineEvaluator::default(), 2)) as Box<dyn Strategy>,
            || Box::new(Negamax::new(PatternEvaluator::default(), 2)) as Box<dyn Strategy>,
            false,
        )?;
        assert_eq!(tally.wins + tally.losses + tally.draws, 8);
        Ok(())
    }

    // ---------------------------------------------------------------------
    // configuration and errors
    // ---------------------------------------------------------------------

    #[test]
    pub fn config_validation() -> Result<()> {
        GameConfig::default().validate()?;
        SearchConfig::default().validate()?;

        let narrow = GameConfig {
            width: 3,
            height: 3,
            win_length: 4,
        };
        assert!(matches!(narrow.validate(), Err(Error::InvalidDimensions { .. })));

        let shallow = SearchConfig {
            max_depth: 0,
            ..SearchConfig::default()
        };
        assert!(matches!(shallow.validate(), Err(Error::InvalidDepth)));

        let timid = Weights {
            aggression: 0.5,
            ..Weights::default()
        };
        assert!(matches!(timid.validate(), Err(Error::InvalidConfig(_))));

        let inverted = Weights {
            win: 10.0,
            ..Weights::default()
        };
        assert!(matches!(inverted.validate(), Err(Error::InvalidConfig(_))));
        Ok(())
    }

    #[test]
    pub fn error_messages() {
        assert_eq!(
            Error::IllegalMove { column: 3 }.to_string(),
            "illegal move, column 3 is full"
        );
        assert_eq!(Error::NoLegalMove.to_string(), "no legal move, the board is full");
        assert_eq!(
            Error::ColumnOutOfRange { column: 9, width: 7 }.to_string(),
            "column 9 out of range, columns must be below 7"
        );
    }
}
