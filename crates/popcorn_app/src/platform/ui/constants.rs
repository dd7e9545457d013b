/// Lines starting with this are commands; anything else is the new query.
pub const COMMAND_PREFIX: char = ':';

pub const CMD_OPEN: &str = "open";
pub const CMD_RATE: &str = "rate";
pub const CMD_ADD: &str = "add";
pub const CMD_BACK: &str = "back";
pub const CMD_DELETE: &str = "del";
pub const CMD_HELP: &str = "help";
pub const CMD_QUIT: &str = "quit";

pub const HELP_TEXT: &str = "\
Type a movie title to search (at least 3 characters).
  :open N    open or close result N
  :rate N    rate the open movie from 1 to 10
  :add       add the open movie to your watched list
  :back      close the open movie
  :del N     remove watched movie N
  :help      show this help
  :quit      exit
Start a search with '::' to search for text beginning with ':'.";
