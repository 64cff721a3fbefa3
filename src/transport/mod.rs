// Transport module - the reconnecting preview socket
mod channel;
mod connector;
mod state;
mod writer;

pub use channel::TransportChannel;
pub use connector::{
    Connection, Connector, FrameSink, FrameStream, InboundFrame, WebSocketConnector,
};
pub use state::{ChannelOutcome, ChannelState, Generation, TransportEvent};
